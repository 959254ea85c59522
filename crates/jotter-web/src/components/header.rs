//! Top bar with the signed-in user and sign-out

use dioxus::prelude::*;
use jotter_core::Session;

use crate::app::{AppServices, Route};
use crate::styles::TEXT_BUTTON;

#[component]
pub fn AppHeader() -> Element {
    let services = use_context::<AppServices>();
    let session = use_context::<Signal<Option<Session>>>();
    let navigator = use_navigator();
    let mut signing_out = use_signal(|| false);

    let display_name = session.read().as_ref().map(Session::display_name);

    let sign_out = move |_: MouseEvent| {
        let services = services.clone();
        async move {
            signing_out.set(true);
            let result = services.session().sign_out().await;
            signing_out.set(false);
            match result {
                Ok(()) => {
                    navigator.replace(Route::Login {});
                }
                Err(error) => tracing::error!("Sign-out failed: {}", error),
            }
        }
    };

    rsx! {
        header {
            style: "
                display: flex;
                align-items: center;
                justify-content: space-between;
                padding: 12px 24px;
                background: #1976d2;
                color: #ffffff;
                box-shadow: 0 2px 4px rgba(0, 0, 0, 0.2);
            ",

            span {
                style: "font-size: 20px; font-weight: 500;",
                "Jotter"
            }

            div {
                style: "display: flex; align-items: center; gap: 16px;",

                if let Some(name) = display_name {
                    span { style: "font-size: 14px; opacity: 0.9;", "{name}" }
                }

                button {
                    style: "{TEXT_BUTTON} color: #ffffff;",
                    disabled: signing_out(),
                    onclick: sign_out,
                    "Sign out"
                }
            }
        }
    }
}
