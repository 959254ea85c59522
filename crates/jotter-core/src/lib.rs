//! jotter-core - Core library for Jotter
//!
//! Everything behind the Jotter web UI that can be exercised without a
//! browser: the note model, the hosted backend seam (Supabase and an
//! in-memory stand-in), the session client, the owner-scoped notes
//! repository, the route guard, and the notes view state machine.

pub mod auth;
pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod forms;
pub mod guard;
pub mod models;
pub mod repository;
pub mod util;

#[cfg(test)]
mod tests;

pub use auth::{AuthError, AuthSession, SessionClient, SessionPersistence};
pub use backend::{MemoryBackend, SupabaseClient};
pub use config::ClientConfig;
pub use controller::{ControllerState, NotesController};
pub use error::{Error, Result, ValidationError};
pub use guard::{GuardDecision, RouteGuard, View};
pub use models::{Note, NoteDraft, NoteId, NotePatch, Session, UserId};
pub use repository::NotesRepository;
