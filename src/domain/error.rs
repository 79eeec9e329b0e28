//! Domain errors

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Hashing error: {0}")]
    Hashing(String),
}

impl DomainError {
    /// Whether the store rejected the write because a unique field collided.
    pub fn is_conflict(&self) -> bool {
        matches!(self, DomainError::Conflict(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
