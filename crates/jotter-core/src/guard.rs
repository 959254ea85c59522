//! Session gate in front of the notes view.

use crate::auth::SessionClient;
use crate::backend::AuthBackend;
use crate::models::Session;

/// Navigable views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Notes,
    Login,
    Signup,
}

impl View {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Notes => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
        }
    }
}

/// Result of one guard activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow(Session),
    Redirect(View),
}

/// Render phase of a guarded view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GuardState {
    /// Lookup in flight; only a loading indicator is shown.
    #[default]
    Resolving,
    Allowed(Session),
    Redirecting(View),
}

impl GuardState {
    /// Guarded content may render only in the `Allowed` phase.
    #[must_use]
    pub const fn renders_content(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}

impl From<GuardDecision> for GuardState {
    fn from(decision: GuardDecision) -> Self {
        match decision {
            GuardDecision::Allow(session) => Self::Allowed(session),
            GuardDecision::Redirect(view) => Self::Redirecting(view),
        }
    }
}

pub struct RouteGuard<B> {
    session: SessionClient<B>,
}

impl<B> Clone for RouteGuard<B> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
        }
    }
}

impl<B: AuthBackend> RouteGuard<B> {
    pub const fn new(session: SessionClient<B>) -> Self {
        Self { session }
    }

    /// Resolve the current session afresh. Absence and lookup errors both
    /// send the visitor to the login view.
    pub async fn check(&self) -> GuardDecision {
        match self.session.current_user().await {
            Ok(Some(session)) => GuardDecision::Allow(session),
            Ok(None) => {
                tracing::debug!("No active session; redirecting to {}", View::Login.path());
                GuardDecision::Redirect(View::Login)
            }
            Err(error) => {
                tracing::error!(%error, "Session lookup failed; redirecting to login");
                GuardDecision::Redirect(View::Login)
            }
        }
    }
}
