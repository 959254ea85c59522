//! Owner-scoped CRUD over the hosted `notes` table.

use std::sync::Arc;

use crate::auth::SessionClient;
use crate::backend::{AuthBackend, NewNoteRow, NoteChanges, NotesBackend};
use crate::models::{Note, NoteDraft, NoteId, NotePatch};
use crate::util::timestamp_now;
use crate::{Error, Result};

/// Notes of whoever is signed in on the shared backend client.
///
/// Every call first resolves the current session and filters by its user id,
/// so a note owned by anyone else behaves exactly like a missing note.
pub struct NotesRepository<B> {
    backend: Arc<B>,
    session: SessionClient<B>,
}

impl<B> Clone for NotesRepository<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            session: self.session.clone(),
        }
    }
}

impl<B: AuthBackend + NotesBackend> NotesRepository<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            session: SessionClient::new(Arc::clone(&backend)),
            backend,
        }
    }

    /// The session client sharing this repository's backend.
    #[must_use]
    pub const fn session(&self) -> &SessionClient<B> {
        &self.session
    }

    /// All notes of the current user, most recently updated first.
    pub async fn list(&self) -> Result<Vec<Note>> {
        let session = self.session.require_session().await?;
        let notes = self.backend.select_notes(&session.user_id).await?;
        tracing::debug!("Listed {} notes", notes.len());
        Ok(notes)
    }

    pub async fn get(&self, id: &NoteId) -> Result<Note> {
        let session = self.session.require_session().await?;
        self.backend
            .select_note(id, &session.user_id)
            .await?
            .ok_or(Error::NotFound(*id))
    }

    /// Insert a note owned by the current user; timestamps come from the backend.
    pub async fn create(&self, draft: &NoteDraft) -> Result<Note> {
        let session = self.session.require_session().await?;
        let row = NewNoteRow {
            title: draft.title().to_string(),
            content: Some(draft.content().to_string()),
            user_id: session.user_id,
        };
        let note = self.backend.insert_note(&row).await?;
        tracing::info!("Created note {}", note.id);
        Ok(note)
    }

    /// Change only the fields present in `patch` and refresh `updated_at`.
    pub async fn update(&self, id: &NoteId, patch: NotePatch) -> Result<Note> {
        let session = self.session.require_session().await?;
        let changes = NoteChanges {
            patch,
            updated_at: timestamp_now(),
        };
        let note = self
            .backend
            .update_note(id, &session.user_id, &changes)
            .await?
            .ok_or(Error::NotFound(*id))?;
        tracing::info!("Updated note {}", note.id);
        Ok(note)
    }

    /// Ensure the note is gone. Unknown or foreign ids succeed without effect.
    pub async fn delete(&self, id: &NoteId) -> Result<()> {
        let session = self.session.require_session().await?;
        self.backend.delete_note(id, &session.user_id).await?;
        tracing::info!("Deleted note {}", id);
        Ok(())
    }
}
