//! Application controller for the notes view.
//!
//! [`ControllerState`] holds the collection, UI mode, loading flag, and the
//! current notification. [`execute`] is the only place that talks to the
//! repository on its behalf. [`NotesController`] ties the two together for
//! hosts that can own the state across awaits; the web app drives the same
//! pieces from reactive signals instead.

mod notification;
mod state;

use crate::backend::{AuthBackend, NotesBackend};
use crate::models::{Note, NoteDraft, NoteId};
use crate::repository::NotesRepository;

pub use notification::{
    Notification, Severity, CREATE_FAILED, DELETE_FAILED, LOAD_FAILED, NOTE_CREATED,
    NOTE_DELETED, NOTE_UPDATED, NOTIFICATION_AUTO_HIDE, UPDATE_FAILED,
};
pub use state::{Command, ControllerState, Outcome, Ticket, UiMode};

/// Run one command against the repository.
pub async fn execute<B: AuthBackend + NotesBackend>(
    repository: &NotesRepository<B>,
    command: Command,
) -> Outcome {
    match command {
        Command::Fetch(ticket) => Outcome::Fetched {
            ticket,
            result: repository.list().await,
        },
        Command::Create { ticket, draft } => Outcome::Created {
            ticket,
            result: repository.create(&draft).await,
        },
        Command::Update { ticket, id, patch } => Outcome::Updated {
            ticket,
            result: repository.update(&id, patch).await,
        },
        Command::Delete { ticket, note } => Outcome::Deleted {
            ticket,
            id: note.id,
            result: repository.delete(&note.id).await,
        },
    }
}

/// Owns a [`ControllerState`] and runs its commands to completion.
pub struct NotesController<B> {
    repository: NotesRepository<B>,
    state: ControllerState,
}

impl<B: AuthBackend + NotesBackend> NotesController<B> {
    pub fn new(repository: NotesRepository<B>) -> Self {
        Self {
            repository,
            state: ControllerState::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ControllerState {
        &self.state
    }

    pub async fn mount(&mut self) {
        let command = self.state.mount();
        self.drive(Some(command)).await;
    }

    pub fn request_create(&mut self) {
        self.state.request_create();
    }

    pub fn request_edit(&mut self, note: Note) {
        self.state.request_edit(note);
    }

    pub fn cancel_compose(&mut self) {
        self.state.cancel_compose();
    }

    /// Submit the open form; `true` when the create or update succeeded.
    pub async fn submit(&mut self, draft: NoteDraft) -> bool {
        let Some(command) = self.state.submit_compose(draft) else {
            return false;
        };
        let outcome = execute(&self.repository, command).await;
        let saved = outcome.is_success();
        let follow_up = self.state.apply(outcome);
        self.drive(follow_up).await;
        saved
    }

    pub fn request_delete(&mut self, id: &NoteId) {
        self.state.request_delete(id);
    }

    pub fn cancel_delete(&mut self) {
        self.state.cancel_delete();
    }

    pub async fn confirm_delete(&mut self) {
        let command = self.state.confirm_delete();
        self.drive(command).await;
    }

    pub fn dismiss(&mut self, id: u64) {
        self.state.dismiss(id);
    }

    async fn drive(&mut self, mut next: Option<Command>) {
        while let Some(command) = next {
            let outcome = execute(&self.repository, command).await;
            next = self.state.apply(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::backend::{MemoryBackend, MemoryClient};

    async fn controller(backend: &MemoryBackend) -> NotesController<MemoryClient> {
        let repository = NotesRepository::new(Arc::new(backend.client()));
        repository
            .session()
            .sign_up("ada@example.com", "hunter22")
            .await
            .unwrap();
        NotesController::new(repository)
    }

    fn titles(controller: &NotesController<MemoryClient>) -> Vec<String> {
        controller
            .state()
            .notes()
            .iter()
            .map(|note| note.title.clone())
            .collect()
    }

    #[tokio::test]
    async fn create_edit_delete_round() {
        let backend = MemoryBackend::new();
        let mut controller = controller(&backend).await;
        controller.mount().await;
        assert!(controller.state().notes().is_empty());
        assert!(!controller.state().loading());

        controller.request_create();
        assert!(controller.submit(NoteDraft::new("A", "x").unwrap()).await);
        assert_eq!(titles(&controller), vec!["A"]);
        assert_eq!(controller.state().mode(), &UiMode::Browsing);
        assert_eq!(
            controller.state().notification().map(|n| n.message.as_str()),
            Some(NOTE_CREATED)
        );

        let note = controller.state().notes()[0].clone();
        controller.request_edit(note.clone());
        assert!(controller.submit(NoteDraft::new("B", "x").unwrap()).await);
        assert_eq!(titles(&controller), vec!["B"]);

        controller.request_delete(&note.id);
        controller.confirm_delete().await;
        assert!(controller.state().notes().is_empty());
        assert_eq!(controller.state().mode(), &UiMode::Browsing);
        assert_eq!(backend.note_count().await, 0);
    }

    #[tokio::test]
    async fn failed_save_keeps_form_and_list() {
        let backend = MemoryBackend::new();
        let mut controller = controller(&backend).await;
        controller.mount().await;
        controller.request_create();
        assert!(controller.submit(NoteDraft::new("A", "").unwrap()).await);

        backend.set_unavailable(true).await;
        controller.request_create();
        assert!(!controller.submit(NoteDraft::new("B", "").unwrap()).await);
        assert_eq!(controller.state().mode(), &UiMode::Composing(None));
        assert_eq!(titles(&controller), vec!["A"]);
        let notification = controller.state().notification().unwrap();
        assert_eq!(notification.message, CREATE_FAILED);
        assert_eq!(notification.severity, Severity::Error);
        let id = notification.id;

        controller.dismiss(id);
        assert!(!controller.state().notification().unwrap().visible);
    }

    #[tokio::test]
    async fn mount_failure_notifies_and_stays_empty() {
        let backend = MemoryBackend::new();
        let mut controller = controller(&backend).await;
        backend.set_unavailable(true).await;

        controller.mount().await;
        assert!(controller.state().notes().is_empty());
        assert!(!controller.state().loading());
        assert_eq!(
            controller.state().notification().map(|n| n.message.as_str()),
            Some(LOAD_FAILED)
        );
    }

    #[tokio::test]
    async fn submit_without_open_form_does_nothing() {
        let backend = MemoryBackend::new();
        let mut controller = controller(&backend).await;
        controller.mount().await;
        assert!(!controller.submit(NoteDraft::new("A", "").unwrap()).await);
        assert_eq!(backend.note_count().await, 0);
    }
}
