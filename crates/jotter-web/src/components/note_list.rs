//! Note list component

use dioxus::prelude::*;
use jotter_core::{ControllerState, Note, NoteId};

use super::{NoteCard, Spinner};

/// Notes in the order the repository returned them, newest change first.
#[component]
pub fn NoteList() -> Element {
    let mut state = use_context::<Signal<ControllerState>>();
    let (loading, notes) = {
        let current = state.read();
        (current.loading(), current.notes().to_vec())
    };

    if loading {
        return rsx! { Spinner {} };
    }

    rsx! {
        div {
            class: "note-list",
            style: "display: flex; flex-direction: column; gap: 16px;",

            if notes.is_empty() {
                div {
                    style: "
                        padding: 48px 20px;
                        text-align: center;
                        color: #757575;
                    ",
                    "No notes yet. Create your first note!"
                }
            } else {
                for note in notes {
                    {
                        let note_id = note.id;

                        rsx! {
                            NoteCard {
                                key: "{note_id}",
                                note,
                                on_edit: move |note: Note| state.write().request_edit(note),
                                on_delete: move |id: NoteId| state.write().request_delete(&id),
                            }
                        }
                    }
                }
            }
        }
    }
}
