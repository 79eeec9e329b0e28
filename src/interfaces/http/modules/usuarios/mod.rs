//! Usuarios module — the usuario CRUD resource

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
