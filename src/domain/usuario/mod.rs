//! Usuario aggregate
//!
//! Contains the Usuario entity, its identifier, the save DTO, and the
//! repository interface.

pub mod model;
pub mod repository;

mod dto_save;

pub use model::{Usuario, UsuarioId};

pub use dto_save::SaveUsuarioDto;

pub use repository::UsuarioRepositoryInterface;
