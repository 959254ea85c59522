//! Local state of the note, login, and sign-up forms.
//!
//! Validation happens here, before anything reaches the network; failures are
//! stored on the form for inline display.

use crate::auth::{validate_credentials, AuthError, AuthResult};
use crate::error::ValidationError;
use crate::guard::View;
use crate::models::{Note, NoteDraft, Session};

pub const MIN_PASSWORD_LEN: usize = 6;

pub const EMAIL_NOT_CONFIRMED_MESSAGE: &str =
    "Your email address has not been confirmed. Please check your inbox for the confirmation email.";
pub const SIGN_IN_FAILED_MESSAGE: &str = "Sign-in failed. Please check your email and password.";
pub const CONFIRM_EMAIL_NOTICE: &str =
    "Account created. Check your email and follow the link to activate your account.";

/// Title/content editor used for both creating and editing a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFormState {
    pub title: String,
    pub content: String,
    pub submitting: bool,
    pub title_error: Option<String>,
}

impl NoteFormState {
    /// Empty for a new note, pre-filled when editing.
    #[must_use]
    pub fn new(initial: Option<&Note>) -> Self {
        initial.map_or_else(Self::default, |note| Self {
            title: note.title.clone(),
            content: note.content_text().to_string(),
            ..Self::default()
        })
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        if !self.title.trim().is_empty() {
            self.title_error = None;
        }
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Validate and lock the form. `None` leaves a field error (or means a
    /// submit is already running).
    pub fn begin_submit(&mut self) -> Option<NoteDraft> {
        if self.submitting {
            return None;
        }
        match NoteDraft::new(&self.title, &self.content) {
            Ok(draft) => {
                self.submitting = true;
                Some(draft)
            }
            Err(error) => {
                self.title_error = Some(error.to_string());
                None
            }
        }
    }

    /// Unlock the form; a saved note clears the fields for the next one.
    pub fn finish_submit(&mut self, saved: bool) {
        self.submitting = false;
        if saved {
            self.title.clear();
            self.content.clear();
            self.title_error = None;
        }
    }
}

/// Email and password as typed, ready for the session client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn require_credentials(email: &str, password: &str) -> Result<Credentials, ValidationError> {
    validate_credentials(email, password)?;
    Ok(Credentials {
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFormState {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl LoginFormState {
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        self.error = None;
        match require_credentials(&self.email, &self.password) {
            Ok(credentials) => {
                self.submitting = true;
                Some(credentials)
            }
            Err(error) => {
                self.error = Some(error.to_string());
                None
            }
        }
    }

    /// Where to go next, or `None` to stay on the form with an error shown.
    pub fn finish_submit(&mut self, result: &AuthResult<Session>) -> Option<View> {
        self.submitting = false;
        match result {
            Ok(_) => Some(View::Notes),
            Err(error) => {
                tracing::error!(%error, "Sign-in failed");
                self.error = Some(Self::failure_message(error).to_string());
                None
            }
        }
    }

    /// Inline message for a failed sign-in. Details other than an unconfirmed
    /// email are not revealed.
    #[must_use]
    pub const fn failure_message(error: &AuthError) -> &'static str {
        match error {
            AuthError::EmailNotConfirmed => EMAIL_NOT_CONFIRMED_MESSAGE,
            _ => SIGN_IN_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupFormState {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub error: Option<String>,
    /// Shown after a sign-up that still needs email confirmation.
    pub notice: Option<String>,
    pub submitting: bool,
}

impl SignupFormState {
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        self.error = None;
        self.notice = None;
        match self.validate() {
            Ok(credentials) => {
                self.submitting = true;
                Some(credentials)
            }
            Err(error) => {
                self.error = Some(error.to_string());
                None
            }
        }
    }

    fn validate(&self) -> Result<Credentials, ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        require_credentials(&self.email, &self.password)
    }

    /// Straight to the notes when a session came back, otherwise to the login
    /// view with a confirmation notice. `None` keeps the form with an error.
    pub fn finish_submit(&mut self, result: &AuthResult<Option<Session>>) -> Option<View> {
        self.submitting = false;
        match result {
            Ok(Some(_)) => Some(View::Notes),
            Ok(None) => {
                self.notice = Some(CONFIRM_EMAIL_NOTICE.to_string());
                Some(View::Login)
            }
            Err(error) => {
                tracing::error!(%error, "Sign-up failed");
                self.error = Some(Self::failure_message(error));
                None
            }
        }
    }

    #[must_use]
    pub fn failure_message(error: &AuthError) -> String {
        let detail = match error {
            AuthError::Api(message) => message.clone(),
            other => other.to_string(),
        };
        format!("Could not create account: {detail}")
    }
}
