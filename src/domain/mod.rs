//! Domain layer - core entities, types and repository traits

pub mod error;
pub mod usuario;

pub use error::{DomainError, DomainResult};
pub use usuario::{SaveUsuarioDto, Usuario, UsuarioId, UsuarioRepositoryInterface};
