//! Pure state machine behind the notes view.
//!
//! Event methods mutate the state and hand back the [`Command`] (if any) that
//! must run against the repository. The result comes back as an [`Outcome`]
//! through [`ControllerState::apply`], which may ask for a follow-up fetch.
//! Nothing here performs I/O.

use crate::models::{Note, NoteDraft, NoteId, NotePatch};
use crate::Result;

use super::notification::{
    Notification, Severity, CREATE_FAILED, DELETE_FAILED, LOAD_FAILED, NOTE_CREATED, NOTE_DELETED,
    NOTE_UPDATED, UPDATE_FAILED,
};

/// Generation stamp attached to every command so late responses can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiMode {
    #[default]
    Browsing,
    /// Form open; `None` creates, `Some(note)` edits that note.
    Composing(Option<Note>),
    ConfirmingDelete(Note),
}

/// Repository work requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch(Ticket),
    Create {
        ticket: Ticket,
        draft: NoteDraft,
    },
    Update {
        ticket: Ticket,
        id: NoteId,
        patch: NotePatch,
    },
    Delete {
        ticket: Ticket,
        note: Note,
    },
}

impl Command {
    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        match self {
            Self::Fetch(ticket)
            | Self::Create { ticket, .. }
            | Self::Update { ticket, .. }
            | Self::Delete { ticket, .. } => *ticket,
        }
    }
}

/// Repository result for a [`Command`], carrying the command's ticket.
#[derive(Debug)]
pub enum Outcome {
    Fetched {
        ticket: Ticket,
        result: Result<Vec<Note>>,
    },
    Created {
        ticket: Ticket,
        result: Result<Note>,
    },
    Updated {
        ticket: Ticket,
        result: Result<Note>,
    },
    Deleted {
        ticket: Ticket,
        id: NoteId,
        result: Result<()>,
    },
}

impl Outcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Fetched { result, .. } => result.is_ok(),
            Self::Created { result, .. } | Self::Updated { result, .. } => result.is_ok(),
            Self::Deleted { result, .. } => result.is_ok(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ControllerState {
    notes: Vec<Note>,
    mode: UiMode,
    loading: bool,
    notification: Option<Notification>,
    next_ticket: u64,
    next_notification: u64,
    /// Newest fetch; only its response may replace `notes`.
    latest_fetch: Option<Ticket>,
    /// Mutation awaiting its response.
    in_flight: Option<Ticket>,
    /// Save whose response still belongs to the open form.
    save_target: Option<Ticket>,
}

impl ControllerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[must_use]
    pub const fn mode(&self) -> &UiMode {
        &self.mode
    }

    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// True while a create, update, or delete is outstanding.
    #[must_use]
    pub const fn submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Note being edited, if the form is open in edit mode.
    #[must_use]
    pub const fn editing(&self) -> Option<&Note> {
        match &self.mode {
            UiMode::Composing(Some(note)) => Some(note),
            _ => None,
        }
    }

    /// Initial load. Also used for every refresh.
    pub fn mount(&mut self) -> Command {
        let ticket = self.issue();
        tracing::info!("Loading notes ({:?})", ticket);
        self.latest_fetch = Some(ticket);
        self.loading = true;
        Command::Fetch(ticket)
    }

    pub fn request_create(&mut self) {
        if self.loading {
            tracing::debug!("Ignoring create request while notes are loading");
        } else if self.mode == UiMode::Browsing {
            self.enter(UiMode::Composing(None));
        } else {
            tracing::debug!("Ignoring create request outside browsing mode");
        }
    }

    pub fn request_edit(&mut self, note: Note) {
        self.enter(UiMode::Composing(Some(note)));
    }

    pub fn cancel_compose(&mut self) {
        if matches!(self.mode, UiMode::Composing(_)) {
            self.enter(UiMode::Browsing);
        } else {
            tracing::debug!("Ignoring cancel; form is not open");
        }
    }

    /// Submit the open form. Ignored unless composing with nothing outstanding.
    pub fn submit_compose(&mut self, draft: NoteDraft) -> Option<Command> {
        let UiMode::Composing(target) = &self.mode else {
            tracing::debug!("Ignoring submit; form is not open");
            return None;
        };
        if self.in_flight.is_some() {
            tracing::debug!("Ignoring submit while another change is in flight");
            return None;
        }
        if self.loading {
            tracing::debug!("Ignoring submit while notes are loading");
            return None;
        }

        let target_id = target.as_ref().map(|note| note.id);
        let ticket = self.issue();
        self.in_flight = Some(ticket);
        self.save_target = Some(ticket);
        Some(match target_id {
            None => Command::Create { ticket, draft },
            Some(id) => Command::Update {
                ticket,
                id,
                patch: draft.into(),
            },
        })
    }

    pub fn request_delete(&mut self, id: &NoteId) {
        let Some(note) = self.notes.iter().find(|note| note.id == *id).cloned() else {
            tracing::debug!("Ignoring delete request for unknown note {}", id);
            return;
        };
        self.enter(UiMode::ConfirmingDelete(note));
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.mode, UiMode::ConfirmingDelete(_)) {
            self.enter(UiMode::Browsing);
        } else {
            tracing::debug!("Ignoring cancel; no delete pending confirmation");
        }
    }

    /// Confirm the pending delete. The dialog stays up until the outcome arrives.
    pub fn confirm_delete(&mut self) -> Option<Command> {
        let UiMode::ConfirmingDelete(note) = &self.mode else {
            tracing::debug!("Ignoring confirm; no delete pending confirmation");
            return None;
        };
        if self.in_flight.is_some() {
            tracing::debug!("Ignoring confirm while another change is in flight");
            return None;
        }

        let note = note.clone();
        let ticket = self.issue();
        self.in_flight = Some(ticket);
        Some(Command::Delete { ticket, note })
    }

    /// Hide the notification with this id; a newer notification is left alone.
    pub fn dismiss(&mut self, id: u64) {
        if let Some(notification) = self.notification.as_mut().filter(|n| n.id == id) {
            notification.visible = false;
        }
    }

    /// Fold a repository result into the state, returning any follow-up command.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Command> {
        match outcome {
            Outcome::Fetched { ticket, result } => {
                self.apply_fetch(ticket, result);
                None
            }
            Outcome::Created { ticket, result } => {
                self.apply_save(ticket, result, NOTE_CREATED, CREATE_FAILED)
            }
            Outcome::Updated { ticket, result } => {
                self.apply_save(ticket, result, NOTE_UPDATED, UPDATE_FAILED)
            }
            Outcome::Deleted { ticket, id, result } => Some(self.apply_delete(ticket, &id, result)),
        }
    }

    fn apply_fetch(&mut self, ticket: Ticket, result: Result<Vec<Note>>) {
        if self.latest_fetch != Some(ticket) {
            tracing::debug!("Discarding stale fetch response {:?}", ticket);
            return;
        }
        self.latest_fetch = None;
        self.loading = false;
        match result {
            Ok(notes) => self.notes = notes,
            Err(error) => {
                tracing::error!(%error, "{}", LOAD_FAILED);
                self.notify(LOAD_FAILED, Severity::Error);
            }
        }
    }

    fn apply_save(
        &mut self,
        ticket: Ticket,
        result: Result<Note>,
        success: &str,
        failure: &str,
    ) -> Option<Command> {
        self.settle(ticket);
        let current = self.save_target == Some(ticket);
        if current {
            self.save_target = None;
        } else {
            tracing::debug!("Save response {:?} no longer matches the open form", ticket);
        }

        match result {
            Ok(_) => {
                if current {
                    self.notify(success, Severity::Success);
                    self.mode = UiMode::Browsing;
                }
                Some(self.mount())
            }
            Err(error) => {
                tracing::error!(%error, "{}", failure);
                if current {
                    self.notify(failure, Severity::Error);
                }
                None
            }
        }
    }

    fn apply_delete(&mut self, ticket: Ticket, id: &NoteId, result: Result<()>) -> Command {
        self.settle(ticket);
        match result {
            Ok(()) => self.notify(NOTE_DELETED, Severity::Success),
            Err(error) => {
                tracing::error!(%error, "{}", DELETE_FAILED);
                self.notify(DELETE_FAILED, Severity::Error);
            }
        }
        if matches!(&self.mode, UiMode::ConfirmingDelete(note) if note.id == *id) {
            self.mode = UiMode::Browsing;
        }
        self.mount()
    }

    fn enter(&mut self, mode: UiMode) {
        if self.save_target.take().is_some() {
            tracing::debug!("Leaving form with a save still in flight");
        }
        self.mode = mode;
    }

    fn settle(&mut self, ticket: Ticket) {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }
    }

    fn issue(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        self.next_notification += 1;
        self.notification = Some(Notification::new(
            self.next_notification,
            message,
            severity,
        ));
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::UserId;
    use crate::Error;

    fn note(title: &str) -> Note {
        let now = Utc::now();
        Note {
            id: NoteId::new(),
            title: title.to_string(),
            content: None,
            created_at: now,
            updated_at: now,
            owner_id: UserId::new(),
        }
    }

    fn draft(title: &str) -> NoteDraft {
        NoteDraft::new(title, "").unwrap()
    }

    fn loaded(notes: Vec<Note>) -> ControllerState {
        let mut state = ControllerState::new();
        let ticket = state.mount().ticket();
        state.apply(Outcome::Fetched {
            ticket,
            result: Ok(notes),
        });
        state
    }

    fn message(state: &ControllerState) -> Option<(&str, Severity)> {
        state
            .notification()
            .filter(|n| n.visible)
            .map(|n| (n.message.as_str(), n.severity))
    }

    #[test]
    fn mount_loads_notes() {
        let mut state = ControllerState::new();
        let command = state.mount();
        assert!(state.loading());
        assert!(matches!(command, Command::Fetch(_)));

        let a = note("A");
        let follow_up = state.apply(Outcome::Fetched {
            ticket: command.ticket(),
            result: Ok(vec![a.clone()]),
        });
        assert_eq!(follow_up, None);
        assert!(!state.loading());
        assert_eq!(state.notes(), &[a]);
        assert_eq!(state.mode(), &UiMode::Browsing);
    }

    #[test]
    fn failed_load_keeps_previous_notes() {
        let a = note("A");
        let mut state = loaded(vec![a.clone()]);
        let ticket = state.mount().ticket();
        state.apply(Outcome::Fetched {
            ticket,
            result: Err(Error::Backend("down".to_string())),
        });
        assert!(!state.loading());
        assert_eq!(state.notes(), &[a]);
        assert_eq!(message(&state), Some((LOAD_FAILED, Severity::Error)));
    }

    #[test]
    fn stale_fetch_is_discarded() {
        let mut state = ControllerState::new();
        let first = state.mount().ticket();
        let second = state.mount().ticket();

        let fresh = note("fresh");
        state.apply(Outcome::Fetched {
            ticket: second,
            result: Ok(vec![fresh.clone()]),
        });
        state.apply(Outcome::Fetched {
            ticket: first,
            result: Ok(vec![note("stale")]),
        });
        assert_eq!(state.notes(), &[fresh]);
        assert!(!state.loading());
    }

    #[test]
    fn create_success_closes_form_and_refreshes() {
        let mut state = loaded(vec![]);
        state.request_create();
        assert_eq!(state.mode(), &UiMode::Composing(None));

        let command = state.submit_compose(draft("A")).unwrap();
        assert!(matches!(&command, Command::Create { draft, .. } if draft.title() == "A"));
        assert!(state.submitting());

        let follow_up = state.apply(Outcome::Created {
            ticket: command.ticket(),
            result: Ok(note("A")),
        });
        assert!(matches!(follow_up, Some(Command::Fetch(_))));
        assert!(!state.submitting());
        assert_eq!(state.mode(), &UiMode::Browsing);
        assert_eq!(message(&state), Some((NOTE_CREATED, Severity::Success)));
    }

    #[test]
    fn update_failure_keeps_form_open() {
        let a = note("A");
        let mut state = loaded(vec![a.clone()]);
        state.request_edit(a.clone());

        let command = state.submit_compose(draft("B")).unwrap();
        assert!(matches!(
            &command,
            Command::Update { id, patch, .. } if *id == a.id && patch.title.as_deref() == Some("B")
        ));
        let follow_up = state.apply(Outcome::Updated {
            ticket: command.ticket(),
            result: Err(Error::Backend("down".to_string())),
        });
        assert_eq!(follow_up, None);
        assert_eq!(state.mode(), &UiMode::Composing(Some(a)));
        assert_eq!(message(&state), Some((UPDATE_FAILED, Severity::Error)));
    }

    #[test]
    fn duplicate_submit_is_ignored() {
        let mut state = loaded(vec![]);
        state.request_create();
        assert!(state.submit_compose(draft("A")).is_some());
        assert!(state.submit_compose(draft("A")).is_none());
    }

    #[test]
    fn stale_save_leaves_new_form_alone() {
        let a = note("A");
        let b = note("B");
        let mut state = loaded(vec![a.clone(), b.clone()]);

        state.request_edit(a);
        let command = state.submit_compose(draft("A2")).unwrap();
        state.request_edit(b.clone());

        let follow_up = state.apply(Outcome::Updated {
            ticket: command.ticket(),
            result: Ok(note("A2")),
        });
        assert!(matches!(follow_up, Some(Command::Fetch(_))));
        assert_eq!(state.mode(), &UiMode::Composing(Some(b)));
        assert_eq!(state.notification(), None);
        assert!(!state.submitting());
    }

    #[test]
    fn request_create_requires_browsing() {
        let a = note("A");
        let mut state = loaded(vec![a.clone()]);
        state.request_edit(a.clone());
        state.request_create();
        assert_eq!(state.mode(), &UiMode::Composing(Some(a)));
    }

    #[test]
    fn cancel_compose_returns_to_browsing() {
        let mut state = loaded(vec![]);
        state.request_create();
        state.cancel_compose();
        assert_eq!(state.mode(), &UiMode::Browsing);
        assert!(state.submit_compose(draft("A")).is_none());
    }

    #[test]
    fn delete_flow_always_clears_and_refreshes() {
        let a = note("A");
        let mut state = loaded(vec![a.clone()]);

        state.request_delete(&NoteId::new());
        assert_eq!(state.mode(), &UiMode::Browsing);

        state.request_delete(&a.id);
        assert_eq!(state.mode(), &UiMode::ConfirmingDelete(a.clone()));
        let command = state.confirm_delete().unwrap();
        assert!(state.confirm_delete().is_none());
        assert_eq!(state.mode(), &UiMode::ConfirmingDelete(a.clone()));

        let follow_up = state.apply(Outcome::Deleted {
            ticket: command.ticket(),
            id: a.id,
            result: Err(Error::Backend("down".to_string())),
        });
        assert!(matches!(follow_up, Some(Command::Fetch(_))));
        assert_eq!(state.mode(), &UiMode::Browsing);
        assert_eq!(message(&state), Some((DELETE_FAILED, Severity::Error)));
    }

    #[test]
    fn delete_outcome_keeps_mode_that_moved_on() {
        let a = note("A");
        let b = note("B");
        let mut state = loaded(vec![a.clone(), b.clone()]);

        state.request_delete(&a.id);
        let command = state.confirm_delete().unwrap();
        state.request_edit(b.clone());

        let follow_up = state.apply(Outcome::Deleted {
            ticket: command.ticket(),
            id: a.id,
            result: Ok(()),
        });
        assert!(matches!(follow_up, Some(Command::Fetch(_))));
        assert_eq!(state.mode(), &UiMode::Composing(Some(b)));
        assert_eq!(message(&state), Some((NOTE_DELETED, Severity::Success)));
    }

    #[test]
    fn loading_blocks_create_and_submit() {
        let mut state = ControllerState::new();
        let ticket = state.mount().ticket();
        state.request_create();
        assert_eq!(state.mode(), &UiMode::Browsing);

        state.apply(Outcome::Fetched {
            ticket,
            result: Ok(vec![]),
        });
        state.request_create();
        assert_eq!(state.mode(), &UiMode::Composing(None));

        state.mount();
        assert!(state.submit_compose(draft("A")).is_none());
        assert!(!state.submitting());
    }

    #[test]
    fn cancel_delete_returns_to_browsing() {
        let a = note("A");
        let mut state = loaded(vec![a.clone()]);
        state.request_delete(&a.id);
        state.cancel_delete();
        assert_eq!(state.mode(), &UiMode::Browsing);
        assert!(state.confirm_delete().is_none());
    }

    #[test]
    fn dismiss_only_hides_matching_notification() {
        let mut state = loaded(vec![]);
        let ticket = state.mount().ticket();
        state.apply(Outcome::Fetched {
            ticket,
            result: Err(Error::NotAuthenticated),
        });
        let first = state.notification().unwrap().id;

        let ticket = state.mount().ticket();
        state.apply(Outcome::Fetched {
            ticket,
            result: Err(Error::NotAuthenticated),
        });
        let second = state.notification().unwrap().id;
        assert!(second > first);

        state.dismiss(first);
        assert!(state.notification().unwrap().visible);
        state.dismiss(second);
        assert!(!state.notification().unwrap().visible);
    }
}
