//! In-memory stand-in for the hosted backend.
//!
//! [`MemoryBackend`] plays the server: user accounts, the `notes` table, and a
//! row-level-security check that runs independently of the owner filter the
//! client sends. Each [`MemoryClient`] plays one browser with its own session.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;

use super::{AuthBackend, NewNoteRow, NoteChanges, NotesBackend};
use crate::auth::{AuthError, AuthResult};
use crate::error::{Error, Result, ValidationError};
use crate::models::{Note, NoteId, Session, UserId};
use crate::util::timestamp_now;

const MIN_PASSWORD_LEN: usize = 6;
const UNAVAILABLE: &str = "network unavailable";
const TITLE_CHECK: &str =
    "new row for relation \"notes\" violates check constraint \"notes_title_not_blank\"";

#[derive(Debug)]
struct Account {
    id: UserId,
    email: String,
    password: String,
    confirmed: bool,
}

#[derive(Debug, Default)]
struct ServerState {
    accounts: HashMap<String, Account>,
    notes: HashMap<NoteId, Note>,
    require_confirmation: bool,
    unavailable: bool,
    last_timestamp: Option<DateTime<Utc>>,
}

impl ServerState {
    /// Strictly increasing server clock, microsecond resolution.
    fn now(&mut self) -> DateTime<Utc> {
        self.stamp(timestamp_now())
    }

    /// Accept a client-supplied timestamp, nudged forward past the last one issued.
    fn stamp(&mut self, proposed: DateTime<Utc>) -> DateTime<Utc> {
        let next = match self.last_timestamp {
            Some(last) if proposed <= last => last + TimeDelta::microseconds(1),
            _ => proposed,
        };
        self.last_timestamp = Some(next);
        next
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(Error::Backend(UNAVAILABLE.to_string()));
        }
        Ok(())
    }

    fn visible(note: &Note, caller: Option<UserId>, owner: &UserId) -> bool {
        caller == Some(note.owner_id) && note.owner_id == *owner
    }
}

/// Shared fake server. Cloning yields another handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<ServerState>>,
}

impl MemoryBackend {
    /// Accounts are active immediately after sign-up.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts must be confirmed (see [`MemoryBackend::confirm_email`]) before sign-in.
    #[must_use]
    pub fn with_email_confirmation() -> Self {
        let state = ServerState {
            require_confirmation: true,
            ..ServerState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// A fresh client with no session, like a new browser tab.
    #[must_use]
    pub fn client(&self) -> MemoryClient {
        MemoryClient {
            server: self.clone(),
            session: Arc::new(Mutex::new(None)),
        }
    }

    /// Mark an account as confirmed, as if the confirmation link was followed.
    pub async fn confirm_email(&self, email: &str) {
        let mut state = self.state.lock().await;
        if let Some(account) = state.accounts.get_mut(&email.to_lowercase()) {
            account.confirmed = true;
        }
    }

    /// Simulate an outage: every call fails until switched back.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().await.unavailable = unavailable;
    }

    /// Total rows in the table, across all owners.
    pub async fn note_count(&self) -> usize {
        self.state.lock().await.notes.len()
    }
}

/// One client of the [`MemoryBackend`], holding its own session.
#[derive(Debug, Clone)]
pub struct MemoryClient {
    server: MemoryBackend,
    session: Arc<Mutex<Option<Session>>>,
}

impl MemoryClient {
    async fn caller(&self) -> Option<UserId> {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|session| session.user_id)
    }
}

impl AuthBackend for MemoryClient {
    async fn current_user(&self) -> AuthResult<Option<Session>> {
        if self.server.state.lock().await.unavailable {
            return Err(AuthError::Api(UNAVAILABLE.to_string()));
        }
        Ok(self.session.lock().await.clone())
    }

    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<Option<Session>> {
        let mut state = self.server.state.lock().await;
        if state.unavailable {
            return Err(AuthError::Api(UNAVAILABLE.to_string()));
        }
        if !email.contains('@') {
            return Err(AuthError::Api(
                "Unable to validate email address: invalid format (400)".to_string(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Api(
                "Password should be at least 6 characters. (422)".to_string(),
            ));
        }
        let key = email.to_lowercase();
        if state.accounts.contains_key(&key) {
            return Err(AuthError::Api("User already registered (422)".to_string()));
        }

        let confirmed = !state.require_confirmation;
        let account = Account {
            id: UserId::new(),
            email: email.to_string(),
            password: password.to_string(),
            confirmed,
        };
        let session = Session {
            user_id: account.id,
            email: Some(account.email.clone()),
        };
        state.accounts.insert(key, account);
        drop(state);

        if !confirmed {
            return Ok(None);
        }
        *self.session.lock().await = Some(session.clone());
        Ok(Some(session))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session> {
        let state = self.server.state.lock().await;
        if state.unavailable {
            return Err(AuthError::Api(UNAVAILABLE.to_string()));
        }
        let account = state
            .accounts
            .get(&email.to_lowercase())
            .filter(|account| account.password == password)
            .ok_or(AuthError::InvalidCredentials)?;
        if !account.confirmed {
            return Err(AuthError::EmailNotConfirmed);
        }
        let session = Session {
            user_id: account.id,
            email: Some(account.email.clone()),
        };
        drop(state);

        *self.session.lock().await = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        if self.server.state.lock().await.unavailable {
            return Err(AuthError::Api(UNAVAILABLE.to_string()));
        }
        *self.session.lock().await = None;
        Ok(())
    }
}

impl NotesBackend for MemoryClient {
    async fn select_notes(&self, owner: &UserId) -> Result<Vec<Note>> {
        let caller = self.caller().await;
        let state = self.server.state.lock().await;
        state.ensure_available()?;

        let mut notes: Vec<Note> = state
            .notes
            .values()
            .filter(|note| ServerState::visible(note, caller, owner))
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }

    async fn select_note(&self, id: &NoteId, owner: &UserId) -> Result<Option<Note>> {
        let caller = self.caller().await;
        let state = self.server.state.lock().await;
        state.ensure_available()?;

        Ok(state
            .notes
            .get(id)
            .filter(|note| ServerState::visible(note, caller, owner))
            .cloned())
    }

    async fn insert_note(&self, row: &NewNoteRow) -> Result<Note> {
        let caller = self.caller().await;
        let mut state = self.server.state.lock().await;
        state.ensure_available()?;

        if caller != Some(row.user_id) {
            return Err(Error::Backend(
                "new row violates row-level security policy for table \"notes\"".to_string(),
            ));
        }
        if row.title.trim().is_empty() {
            return Err(ValidationError::Rejected(TITLE_CHECK.to_string()).into());
        }

        let now = state.now();
        let note = Note {
            id: NoteId::new(),
            title: row.title.clone(),
            content: row.content.clone(),
            created_at: now,
            updated_at: now,
            owner_id: row.user_id,
        };
        state.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn update_note(
        &self,
        id: &NoteId,
        owner: &UserId,
        changes: &NoteChanges,
    ) -> Result<Option<Note>> {
        let caller = self.caller().await;
        let mut state = self.server.state.lock().await;
        state.ensure_available()?;

        let matches = state
            .notes
            .get(id)
            .is_some_and(|note| ServerState::visible(note, caller, owner));
        if !matches {
            return Ok(None);
        }
        if changes
            .patch
            .title
            .as_ref()
            .is_some_and(|title| title.trim().is_empty())
        {
            return Err(ValidationError::Rejected(TITLE_CHECK.to_string()).into());
        }

        let stamp = state.stamp(changes.updated_at);
        let Some(note) = state.notes.get_mut(id) else {
            return Ok(None);
        };
        if let Some(title) = &changes.patch.title {
            note.title.clone_from(title);
        }
        if let Some(content) = &changes.patch.content {
            note.content = Some(content.clone());
        }
        note.updated_at = stamp;
        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, id: &NoteId, owner: &UserId) -> Result<()> {
        let caller = self.caller().await;
        let mut state = self.server.state.lock().await;
        state.ensure_available()?;

        let matches = state
            .notes
            .get(id)
            .is_some_and(|note| ServerState::visible(note, caller, owner));
        if matches {
            state.notes.remove(id);
        }
        Ok(())
    }
}
