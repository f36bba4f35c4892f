//! Custom error types for Sonnic Tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Sonnic Tracker operations
#[derive(Error, Debug)]
pub enum SonnicError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors (unreadable or malformed persisted data)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation errors for user input and data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Password hashing failures
    #[error("Credential error: {0}")]
    Credential(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Registration under a name that is already taken
    #[error("User already exists: {0}. Try logging in.")]
    AlreadyExists(String),

    /// Login with an unknown name or a wrong password
    #[error("Login failed. Incorrect name or password.")]
    AuthenticationFailed,

    /// Password change with a wrong current password
    #[error("Incorrect current password.")]
    Unauthorized,

    /// Withdrawal larger than the current balance
    #[error("Insufficient balance: need {needed}, have {available}. Withdrawal cancelled.")]
    InsufficientFunds { needed: i64, available: i64 },

    /// Unrecognized menu input
    #[error("Invalid option: '{0}'. Try again.")]
    InvalidOption(String),
}

impl SonnicError {
    /// Create a "not found" error for user accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether the menu loop can report this error and carry on.
    ///
    /// Everything except I/O and storage corruption is a user-facing outcome.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Storage(_) | Self::Json(_))
    }
}

impl From<std::io::Error> for SonnicError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SonnicError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for SonnicError {
    fn from(err: csv::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for Sonnic Tracker operations
pub type SonnicResult<T> = Result<T, SonnicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SonnicError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = SonnicError::account_not_found("Alice");
        assert_eq!(err.to_string(), "User not found: Alice");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insufficient_funds_error() {
        let err = SonnicError::InsufficientFunds {
            needed: 600,
            available: 500,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: need 600, have 500. Withdrawal cancelled."
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SonnicError = io_err.into();
        assert!(matches!(err, SonnicError::Io(_)));
        assert!(!err.is_recoverable());
    }
}
