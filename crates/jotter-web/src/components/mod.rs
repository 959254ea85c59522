//! UI Components
//!
//! Building blocks for the notes, login, and sign-up views.

mod auth_required;
mod delete_dialog;
mod header;
mod note_card;
mod note_form;
mod note_list;
mod spinner;
mod toast;

pub use auth_required::AuthRequired;
pub use delete_dialog::DeleteDialog;
pub use header::AppHeader;
pub use note_card::NoteCard;
pub use note_form::NoteForm;
pub use note_list::NoteList;
pub use spinner::Spinner;
pub use toast::Toast;
