//! Password hashing utilities

use bcrypt::{hash, verify};

/// Cost factor used when the configuration does not say otherwise.
pub const DEFAULT_HASH_COST: u32 = 10;
/// Range bcrypt accepts for the cost factor.
pub const MIN_HASH_COST: u32 = 4;
pub const MAX_HASH_COST: u32 = 31;

/// bcrypt hasher with a fixed cost factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password using bcrypt. Every call yields a fresh salt.
    pub fn hash(&self, password: &str) -> Result<String, bcrypt::BcryptError> {
        hash(password, self.cost)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_COST)
    }
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}
