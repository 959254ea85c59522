//! Notes page: the signed-in user's collection

use dioxus::prelude::*;
use jotter_core::controller::UiMode;
use jotter_core::ControllerState;

use crate::app::AppServices;
use crate::components::{AppHeader, AuthRequired, DeleteDialog, NoteForm, NoteList, Toast};
use crate::dispatch::dispatch;
use crate::styles::PRIMARY_BUTTON;

#[component]
pub fn Notes() -> Element {
    rsx! {
        AuthRequired {
            NotesPage {}
        }
    }
}

#[component]
fn NotesPage() -> Element {
    let services = use_context::<AppServices>();
    let mut state = use_signal(ControllerState::new);
    use_context_provider(|| state);

    use_effect(move || {
        let command = state.write().mount();
        dispatch(state, services.clone(), Some(command));
    });

    let mode = state.read().mode().clone();
    let loading = state.read().loading();

    let form = match &mode {
        UiMode::Composing(target) => {
            let key = target
                .as_ref()
                .map_or_else(|| "new".to_string(), |note| note.id.to_string());
            rsx! {
                NoteForm { key: "{key}", initial: target.clone() }
            }
        }
        _ => rsx! {},
    };

    let dialog = match &mode {
        UiMode::ConfirmingDelete(note) => rsx! {
            DeleteDialog { note: note.clone() }
        },
        _ => rsx! {},
    };

    rsx! {
        AppHeader {}

        main {
            style: "max-width: 760px; margin: 0 auto; padding: 32px 16px;",

            div {
                style: "
                    display: flex;
                    align-items: center;
                    justify-content: space-between;
                    margin-bottom: 24px;
                ",
                h1 {
                    style: "margin: 0; font-size: 28px; font-weight: 500;",
                    "My notes"
                }
                if mode == UiMode::Browsing {
                    button {
                        style: PRIMARY_BUTTON,
                        disabled: loading,
                        onclick: move |_| state.write().request_create(),
                        "New note"
                    }
                }
            }

            {form}

            NoteList {}
        }

        {dialog}

        Toast {}
    }
}
