//! Error types for jotter-core

use thiserror::Error;

use crate::auth::AuthError;
use crate::models::NoteId;

/// Result type alias using jotter-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jotter-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Sign-in, sign-up, session lookup, or sign-out failed
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Operation attempted without an active session
    #[error("No active session")]
    NotAuthenticated,

    /// Input rejected locally or by the backend
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No note with this id is owned by the caller
    #[error("Note not found: {0}")]
    NotFound(NoteId),

    /// Any other failure reported by the data layer
    #[error("Backend error: {0}")]
    Backend(String),

    /// Transport failure talking to the backend
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed backend payload
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True for the generic backend bucket, including transport and payload errors.
    #[must_use]
    pub const fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            Self::Backend(_) | Self::Http(_) | Self::Serialization(_)
        )
    }
}

/// Input validation failures, checked locally before network dispatch where possible
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Email is required")]
    MissingEmail,
    #[error("Password is required")]
    MissingPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Rejected by backend: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_bucket_covers_transport_and_payload_errors() {
        assert!(Error::Backend("boom".to_string()).is_backend_failure());
        let json_error = serde_json::from_str::<u8>("nope").unwrap_err();
        assert!(Error::from(json_error).is_backend_failure());
        assert!(!Error::NotAuthenticated.is_backend_failure());
        assert!(!Error::from(ValidationError::EmptyTitle).is_backend_failure());
    }

    #[test]
    fn password_too_short_mentions_minimum() {
        let message = ValidationError::PasswordTooShort { min: 6 }.to_string();
        assert_eq!(message, "Password must be at least 6 characters");
    }
}
