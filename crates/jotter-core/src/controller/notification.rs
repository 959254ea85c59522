use std::time::Duration;

/// How long a notification stays up before the UI hides it on its own.
pub const NOTIFICATION_AUTO_HIDE: Duration = Duration::from_secs(6);

pub const NOTE_CREATED: &str = "Note created";
pub const NOTE_UPDATED: &str = "Note updated";
pub const NOTE_DELETED: &str = "Note deleted";
pub const LOAD_FAILED: &str = "Failed to load notes";
pub const CREATE_FAILED: &str = "Failed to create note";
pub const UPDATE_FAILED: &str = "Failed to update note";
pub const DELETE_FAILED: &str = "Failed to delete note";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Transient status message. Only the newest one is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub visible: bool,
}

impl Notification {
    pub(crate) fn new(id: u64, message: &str, severity: Severity) -> Self {
        Self {
            id,
            message: message.to_string(),
            severity,
            visible: true,
        }
    }
}
