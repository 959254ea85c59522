//! Create/edit form for a single note

use dioxus::prelude::*;
use jotter_core::forms::NoteFormState;
use jotter_core::{ControllerState, Note};

use crate::app::AppServices;
use crate::dispatch::run;
use crate::styles::{FIELD_ERROR, INPUT, PANEL, PRIMARY_BUTTON, TEXT_BUTTON};

/// Empty when `initial` is `None`, otherwise pre-filled for editing.
#[component]
pub fn NoteForm(#[props(!optional)] initial: Option<Note>) -> Element {
    let mut state = use_context::<Signal<ControllerState>>();
    let services = use_context::<AppServices>();
    let mut form = use_signal(|| NoteFormState::new(initial.as_ref()));

    let heading = if initial.is_some() { "Edit note" } else { "New note" };
    let submit_label = if initial.is_some() { "Save" } else { "Create" };

    let onsubmit = move |event: FormEvent| {
        event.prevent_default();
        let Some(draft) = form.write().begin_submit() else {
            return;
        };
        let command = state.write().submit_compose(draft);
        let services = services.clone();
        spawn_forever(async move {
            let saved = run(state, services, command).await.unwrap_or(false);
            if let Ok(mut form) = form.try_write() {
                form.finish_submit(saved);
            }
        });
    };

    let current = form.read().clone();

    rsx! {
        form {
            style: "{PANEL} margin-bottom: 24px;",
            onsubmit,

            h2 {
                style: "margin: 0 0 16px; font-size: 20px; font-weight: 500;",
                "{heading}"
            }

            div {
                style: "margin-bottom: 16px;",
                input {
                    style: INPUT,
                    r#type: "text",
                    placeholder: "Title",
                    autofocus: true,
                    value: "{current.title}",
                    disabled: current.submitting,
                    oninput: move |evt: FormEvent| form.write().set_title(evt.value()),
                }
                if let Some(error) = current.title_error.clone() {
                    p { style: FIELD_ERROR, "{error}" }
                }
            }

            textarea {
                style: "{INPUT} min-height: 120px; resize: vertical;",
                placeholder: "Content",
                value: "{current.content}",
                disabled: current.submitting,
                oninput: move |evt: FormEvent| form.write().set_content(evt.value()),
            }

            div {
                style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 16px;",
                button {
                    style: TEXT_BUTTON,
                    r#type: "button",
                    disabled: current.submitting,
                    onclick: move |_| state.write().cancel_compose(),
                    "Cancel"
                }
                button {
                    style: PRIMARY_BUTTON,
                    r#type: "submit",
                    disabled: current.submitting,
                    if current.submitting { "Saving..." } else { "{submit_label}" }
                }
            }
        }
    }
}
