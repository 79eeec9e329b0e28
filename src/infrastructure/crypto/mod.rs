//! Cryptographic helpers

pub mod password;

pub use password::{verify_password, PasswordHasher, DEFAULT_HASH_COST, MAX_HASH_COST, MIN_HASH_COST};
