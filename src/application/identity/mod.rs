//! Identity use-cases (usuario management)

pub mod service;

pub use service::{UsuarioInput, UsuarioService};
