//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod storage;

pub use crypto::PasswordHasher;
pub use database::{init_database, MongoUsuarioRepository};
pub use storage::InMemoryUsuarioRepository;
