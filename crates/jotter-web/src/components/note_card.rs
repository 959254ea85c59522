//! Note card component

use chrono::Local;
use dioxus::prelude::*;
use jotter_core::{Note, NoteId};

use crate::format::updated_label;
use crate::styles::{DANGER_BUTTON, PANEL, TEXT_BUTTON};

/// A single note with its edit and delete actions.
#[component]
pub fn NoteCard(note: Note, on_edit: EventHandler<Note>, on_delete: EventHandler<NoteId>) -> Element {
    let subheader = updated_label(&note.updated_at.with_timezone(&Local));
    let content = note.content_text().to_string();
    let title = note.title.clone();
    let note_id = note.id;

    rsx! {
        article {
            style: "{PANEL} padding: 16px 20px;",

            h2 {
                style: "margin: 0; font-size: 18px; font-weight: 500;",
                "{title}"
            }
            p {
                style: "margin: 4px 0 12px; font-size: 12px; color: #757575;",
                "{subheader}"
            }

            if !content.is_empty() {
                div {
                    style: "white-space: pre-wrap; font-size: 14px; line-height: 1.5;",
                    "{content}"
                }
            }

            div {
                style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 12px;",
                button {
                    style: TEXT_BUTTON,
                    "aria-label": "Edit note",
                    onclick: move |_| on_edit.call(note.clone()),
                    "Edit"
                }
                button {
                    style: DANGER_BUTTON,
                    "aria-label": "Delete note",
                    onclick: move |_| on_delete.call(note_id),
                    "Delete"
                }
            }
        }
    }
}
