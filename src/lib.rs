//! # Usuarios API
//!
//! REST resource for `Usuario` records: create, list, fetch, replace and
//! delete, with request-body validation and bcrypt password hashing over a
//! MongoDB collection (or an in-memory store for development).
//!
//! ## Architecture
//!
//! - **domain**: Usuario entity, id rules, repository trait, errors
//! - **application**: `UsuarioService` use-cases (hashing + one store call)
//! - **infrastructure**: MongoDB and in-memory repositories, bcrypt
//! - **interfaces**: axum router, extractors, handlers, Swagger UI
//! - **server**: runtime lifecycle and tracing setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export the building blocks embedders need
pub use application::UsuarioService;
pub use infrastructure::{InMemoryUsuarioRepository, MongoUsuarioRepository, PasswordHasher};
pub use interfaces::create_api_router;
