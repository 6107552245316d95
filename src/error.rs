//! Custom error types for Vaultline
//!
//! This module defines the error hierarchy for the encode/decode pipeline using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Vaultline operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Wrong passphrase, or ciphertext that was tampered with or malformed
    #[error("Bad key: {0}")]
    BadKey(String),

    /// Decoded bytes that do not describe a valid record
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Container sequence holds an absent entry
    #[error("Integrity error: missing chunk at position {index}")]
    Integrity { index: usize },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Index outside the bounds of a collection
    #[error("Index {index} out of range for collection of size {len}")]
    Index { index: usize, len: usize },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Encryption setup errors (cipher or key derivation could not be built)
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl VaultError {
    /// Check if this error means the passphrase did not open the data
    pub fn is_bad_key(&self) -> bool {
        matches!(self, Self::BadKey(_))
    }

    /// Check if this is a record deserialization error
    pub fn is_deserialization(&self) -> bool {
        matches!(self, Self::Deserialization(_))
    }

    /// Check if this is an integrity error
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity { .. })
    }

    /// Check if this is an out-of-range index
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index { .. })
    }
}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Vaultline operations
pub type VaultResult<T> = Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VaultError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_index_error() {
        let err = VaultError::Index { index: 5, len: 3 };
        assert_eq!(
            err.to_string(),
            "Index 5 out of range for collection of size 3"
        );
        assert!(err.is_index());
    }

    #[test]
    fn test_integrity_error() {
        let err = VaultError::Integrity { index: 2 };
        assert_eq!(err.to_string(), "Integrity error: missing chunk at position 2");
        assert!(err.is_integrity());
        assert!(!err.is_bad_key());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let vault_err: VaultError = io_err.into();
        assert!(matches!(vault_err, VaultError::Io(_)));
    }
}
