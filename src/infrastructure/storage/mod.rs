//! Storage backends that do not need an external database

pub mod memory;

pub use memory::InMemoryUsuarioRepository;
