use std::fmt;
use std::str::FromStr;

use crate::domain::{DomainError, DomainResult};

/// Length of a store-assigned identifier in hex characters (12-byte ObjectId).
pub const USUARIO_ID_LEN: usize = 24;

/// Store-assigned identifier of a [`Usuario`].
///
/// Always 24 hexadecimal characters, kept in lowercase so that ids typed in
/// either case address the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsuarioId(String);

impl UsuarioId {
    /// Parse an id coming from the outside world (path segment, store).
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if raw.len() != USUARIO_ID_LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DomainError::Validation(format!("malformed id '{}'", raw)));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UsuarioId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UsuarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted user record.
///
/// `senha` holds the bcrypt hash, never the submitted plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usuario {
    pub id: UsuarioId,
    pub display_name: String,
    pub email: String,
    pub senha: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_24_hex_chars() {
        let id = UsuarioId::parse("5d1e2b3c4a5f6e7d8c9b0a1f").unwrap();
        assert_eq!(id.as_str(), "5d1e2b3c4a5f6e7d8c9b0a1f");
    }

    #[test]
    fn parse_normalizes_case() {
        let upper = UsuarioId::parse("5D1E2B3C4A5F6E7D8C9B0A1F").unwrap();
        let lower = UsuarioId::parse("5d1e2b3c4a5f6e7d8c9b0a1f").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(UsuarioId::parse("").is_err());
        assert!(UsuarioId::parse("5d1e2b3c4a5f6e7d8c9b0a1").is_err());
        assert!(UsuarioId::parse("5d1e2b3c4a5f6e7d8c9b0a1f0").is_err());
    }

    #[test]
    fn parse_rejects_non_hex() {
        let err = UsuarioId::parse("5d1e2b3c4a5f6e7d8c9b0a1g").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn parse_rejects_multibyte_input_of_same_byte_length() {
        // 12 two-byte chars = 24 bytes
        assert!(UsuarioId::parse("éééééééééééé").is_err());
    }
}
