//! Session/auth client.
//!
//! Wraps sign-up, sign-in, sign-out, and current-user lookup against whatever
//! [`AuthBackend`] the app was constructed with. Every other component gets
//! its notion of identity from here.

mod persistence;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::AuthBackend;
use crate::error::ValidationError;
use crate::models::Session;
use crate::util::unix_timestamp_now;

pub use persistence::{MemorySessionStore, SessionPersistence};

const EXPIRY_SKEW_SECONDS: i64 = 60;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Supabase auth is not configured for this build.")]
    NotConfigured,
    #[error("Invalid auth configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("Email not confirmed")]
    EmailNotConfirmed,
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Auth API error: {0}")]
    Api(String),
    #[error("Session storage error: {0}")]
    SessionStorage(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Tokens issued by the auth service together with the principal they belong to.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub user: Session,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= unix_timestamp_now() + EXPIRY_SKEW_SECONDS
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// Identity operations consumed by the UI and the notes repository.
pub struct SessionClient<B> {
    backend: Arc<B>,
}

impl<B> Clone for SessionClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: AuthBackend> SessionClient<B> {
    pub const fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Look up the active session. "No session" is `Ok(None)`, never an error.
    pub async fn current_user(&self) -> AuthResult<Option<Session>> {
        self.backend.current_user().await
    }

    /// Register a new account.
    ///
    /// Returns `None` when the backend requires email confirmation before the
    /// account becomes active; callers must not assume a session exists.
    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<Option<Session>> {
        validate_credentials(email, password)?;
        let session = self.backend.sign_up(email.trim(), password).await?;
        match &session {
            Some(session) => tracing::info!("Signed up and signed in as {}", session.user_id),
            None => tracing::info!("Signed up; email confirmation required"),
        }
        Ok(session)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Session> {
        validate_credentials(email, password)?;
        let session = self
            .backend
            .sign_in_with_password(email.trim(), password)
            .await?;
        tracing::info!("Signed in as {}", session.user_id);
        Ok(session)
    }

    pub async fn sign_out(&self) -> AuthResult<()> {
        self.backend.sign_out().await?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Resolve the current session or fail with [`crate::Error::NotAuthenticated`].
    pub async fn require_session(&self) -> crate::Result<Session> {
        self.current_user()
            .await?
            .ok_or(crate::Error::NotAuthenticated)
    }
}

/// Both fields must be non-blank. Shared by the forms and the session client.
pub(crate) fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if password.trim().is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(())
}
