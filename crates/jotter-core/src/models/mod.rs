//! Data models for Jotter

mod note;
mod session;

pub use note::{Note, NoteDraft, NoteId, NotePatch};
pub use session::{Session, UserId};
