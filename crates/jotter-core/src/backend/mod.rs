//! The seam between Jotter and its hosted backend.
//!
//! A backend client is constructed once at start-up and shared (behind an
//! `Arc`) by the session client and the notes repository. Production code uses
//! [`SupabaseClient`]; tests and demos use [`MemoryBackend`].

mod memory;
pub mod supabase;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::AuthResult;
use crate::models::{Note, NoteId, NotePatch, Session, UserId};
use crate::Result;

pub use memory::{MemoryBackend, MemoryClient};
pub use supabase::SupabaseClient;

/// Hosted identity service.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    /// Active session, or `None`. Only transport/service failures are errors.
    async fn current_user(&self) -> AuthResult<Option<Session>>;

    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<Option<Session>>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session>;

    async fn sign_out(&self) -> AuthResult<()>;
}

/// Hosted `notes` table. Every call carries the owner filter explicitly.
#[allow(async_fn_in_trait)]
pub trait NotesBackend {
    /// Rows owned by `owner`, newest `updated_at` first.
    async fn select_notes(&self, owner: &UserId) -> Result<Vec<Note>>;

    async fn select_note(&self, id: &NoteId, owner: &UserId) -> Result<Option<Note>>;

    /// Insert and return the stored row, timestamps assigned by the backend.
    async fn insert_note(&self, row: &NewNoteRow) -> Result<Note>;

    /// Apply `changes` to the row matching id and owner; `None` if nothing matched.
    async fn update_note(
        &self,
        id: &NoteId,
        owner: &UserId,
        changes: &NoteChanges,
    ) -> Result<Option<Note>>;

    /// Remove the row matching id and owner. Matching nothing is not an error.
    async fn delete_note(&self, id: &NoteId, owner: &UserId) -> Result<()>;
}

/// Insert payload for the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNoteRow {
    pub title: String,
    pub content: Option<String>,
    pub user_id: UserId,
}

/// Update payload for the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteChanges {
    #[serde(flatten)]
    pub patch: NotePatch,
    pub updated_at: DateTime<Utc>,
}
