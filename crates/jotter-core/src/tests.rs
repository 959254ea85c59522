//! Cross-component scenarios against the in-memory backend.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use crate::backend::{AuthBackend, MemoryBackend, MemoryClient};
use crate::controller::{NotesController, UiMode, NOTE_UPDATED};
use crate::forms::{LoginFormState, NoteFormState, SignupFormState};
use crate::guard::{GuardDecision, GuardState, RouteGuard, View};
use crate::repository::NotesRepository;

fn repository(backend: &MemoryBackend) -> NotesRepository<MemoryClient> {
    NotesRepository::new(Arc::new(backend.client()))
}

#[tokio::test]
async fn guard_redirects_until_signed_in() {
    let backend = MemoryBackend::new();
    backend
        .client()
        .sign_up("ada@example.com", "hunter22")
        .await
        .unwrap();

    let repository = repository(&backend);
    let guard = RouteGuard::new(repository.session().clone());
    assert_eq!(
        GuardState::from(guard.check().await),
        GuardState::Redirecting(View::Login)
    );

    let mut login = LoginFormState {
        email: "ada@example.com".to_string(),
        password: "hunter22".to_string(),
        ..LoginFormState::default()
    };
    let credentials = login.begin_submit().unwrap();
    let result = repository
        .session()
        .sign_in(&credentials.email, &credentials.password)
        .await;
    assert_eq!(login.finish_submit(&result), Some(View::Notes));

    let decision = guard.check().await;
    assert!(matches!(&decision, GuardDecision::Allow(session) if session.email.as_deref() == Some("ada@example.com")));
    assert!(GuardState::from(decision).renders_content());
}

#[tokio::test]
async fn create_then_edit_keeps_created_at() {
    let backend = MemoryBackend::new();
    let repository = repository(&backend);
    repository
        .session()
        .sign_up("ada@example.com", "hunter22")
        .await
        .unwrap();
    let mut controller = NotesController::new(repository);
    controller.mount().await;

    controller.request_create();
    let mut form = NoteFormState::new(None);
    form.set_title("A");
    form.set_content("x");
    let draft = form.begin_submit().unwrap();
    let saved = controller.submit(draft).await;
    form.finish_submit(saved);
    assert!(saved);

    let created = controller.state().notes()[0].clone();

    controller.request_edit(created.clone());
    let mut form = NoteFormState::new(controller.state().editing());
    assert_eq!(form.content, "x");
    form.set_title("B");
    let draft = form.begin_submit().unwrap();
    assert!(controller.submit(draft).await);

    let notes = controller.state().notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, created.id);
    assert_eq!(notes[0].title, "B");
    assert_eq!(notes[0].created_at, created.created_at);
    assert!(notes[0].updated_at > created.updated_at);
    assert_eq!(
        controller.state().notification().map(|n| n.message.as_str()),
        Some(NOTE_UPDATED)
    );
}

#[tokio::test]
async fn blank_title_never_reaches_backend() {
    let backend = MemoryBackend::new();
    let repository = repository(&backend);
    repository
        .session()
        .sign_up("ada@example.com", "hunter22")
        .await
        .unwrap();
    let mut controller = NotesController::new(repository);
    controller.mount().await;
    controller.request_create();

    let mut form = NoteFormState::new(None);
    form.set_title(" \t ");
    assert!(form.begin_submit().is_none());
    assert!(form.title_error.is_some());
    assert_eq!(controller.state().mode(), &UiMode::Composing(None));
    assert_eq!(backend.note_count().await, 0);
}

#[tokio::test]
async fn signup_with_confirmation_goes_to_login() {
    let backend = MemoryBackend::with_email_confirmation();
    let repository = repository(&backend);

    let mut signup = SignupFormState {
        email: "bob@example.com".to_string(),
        password: "hunter22".to_string(),
        confirm_password: "hunter22".to_string(),
        ..SignupFormState::default()
    };
    let credentials = signup.begin_submit().unwrap();
    let result = repository
        .session()
        .sign_up(&credentials.email, &credentials.password)
        .await;
    assert_eq!(signup.finish_submit(&result), Some(View::Login));
    assert!(signup.notice.is_some());

    let guard = RouteGuard::new(repository.session().clone());
    assert_eq!(guard.check().await, GuardDecision::Redirect(View::Login));
}

#[tokio::test]
async fn two_browsers_share_nothing_but_the_server() {
    let backend = MemoryBackend::new();
    let ada = repository(&backend);
    let eve = repository(&backend);
    ada.session()
        .sign_up("ada@example.com", "hunter22")
        .await
        .unwrap();
    eve.session()
        .sign_up("eve@example.com", "hunter22")
        .await
        .unwrap();

    let mut ada_view = NotesController::new(ada);
    ada_view.request_create();
    ada_view
        .submit(crate::models::NoteDraft::new("mine", "").unwrap())
        .await;

    let mut eve_view = NotesController::new(eve);
    eve_view.mount().await;
    assert!(eve_view.state().notes().is_empty());
    assert_eq!(backend.note_count().await, 1);
}
