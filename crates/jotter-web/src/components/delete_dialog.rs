//! Confirmation dialog shown before a note is deleted

use dioxus::prelude::*;
use jotter_core::{ControllerState, Note};

use crate::app::AppServices;
use crate::dispatch::dispatch;
use crate::format::delete_prompt;
use crate::styles::{DANGER_BUTTON, PANEL, TEXT_BUTTON};

#[component]
pub fn DeleteDialog(note: Note) -> Element {
    let mut state = use_context::<Signal<ControllerState>>();
    let services = use_context::<AppServices>();
    let busy = state.read().submitting();
    let prompt = delete_prompt(&note.title);

    rsx! {
        div {
            style: "
                position: fixed;
                inset: 0;
                display: flex;
                align-items: center;
                justify-content: center;
                background: rgba(0, 0, 0, 0.5);
                z-index: 1000;
            ",
            onclick: move |_| {
                if !busy {
                    state.write().cancel_delete();
                }
            },

            div {
                role: "dialog",
                style: "{PANEL} max-width: 420px; width: calc(100% - 32px);",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),

                h2 {
                    style: "margin: 0 0 12px; font-size: 20px; font-weight: 500;",
                    "Delete note"
                }
                p {
                    style: "margin: 0 0 20px; color: #424242;",
                    "{prompt}"
                }

                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",
                    button {
                        style: TEXT_BUTTON,
                        disabled: busy,
                        onclick: move |_| state.write().cancel_delete(),
                        "Cancel"
                    }
                    button {
                        style: DANGER_BUTTON,
                        disabled: busy,
                        onclick: move |_| {
                            let command = state.write().confirm_delete();
                            dispatch(state, services.clone(), command);
                        },
                        "Delete"
                    }
                }
            }
        }
    }
}
