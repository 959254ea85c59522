//! Sign-in page

use dioxus::prelude::*;
use jotter_core::forms::LoginFormState;

use crate::app::{AppServices, Route};
use crate::styles::{ALERT_ERROR, INPUT, PANEL, PRIMARY_BUTTON};

#[component]
pub fn Login() -> Element {
    let services = use_context::<AppServices>();
    let navigator = use_navigator();
    let mut form = use_signal(LoginFormState::default);

    let onsubmit = move |event: FormEvent| {
        event.prevent_default();
        let Some(credentials) = form.write().begin_submit() else {
            return;
        };
        let services = services.clone();
        spawn(async move {
            let result = services
                .session()
                .sign_in(&credentials.email, &credentials.password)
                .await;
            let next = form.write().finish_submit(&result);
            if let Some(view) = next {
                navigator.push(Route::from(view));
            }
        });
    };

    let current = form.read().clone();

    rsx! {
        AuthCard {
            title: "Sign in",

            if let Some(error) = current.error.clone() {
                div { role: "alert", style: ALERT_ERROR, "{error}" }
            }

            form {
                onsubmit,
                input {
                    style: "{INPUT} margin-bottom: 12px;",
                    r#type: "email",
                    placeholder: "Email",
                    autocomplete: "email",
                    value: "{current.email}",
                    disabled: current.submitting,
                    oninput: move |evt: FormEvent| form.write().email = evt.value(),
                }
                input {
                    style: "{INPUT} margin-bottom: 20px;",
                    r#type: "password",
                    placeholder: "Password",
                    autocomplete: "current-password",
                    value: "{current.password}",
                    disabled: current.submitting,
                    oninput: move |evt: FormEvent| form.write().password = evt.value(),
                }
                button {
                    style: "{PRIMARY_BUTTON} width: 100%;",
                    r#type: "submit",
                    disabled: current.submitting,
                    if current.submitting { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                style: "margin: 16px 0 0; text-align: center; font-size: 14px;",
                "No account yet? "
                Link { to: Route::Signup {}, "Create one" }
            }
        }
    }
}

/// Centered panel shared by the sign-in and sign-up pages.
#[component]
pub(super) fn AuthCard(title: &'static str, children: Element) -> Element {
    rsx! {
        div {
            style: "
                display: flex;
                justify-content: center;
                padding: 64px 16px;
            ",
            div {
                style: "{PANEL} width: 100%; max-width: 380px;",
                h1 {
                    style: "margin: 0 0 24px; font-size: 24px; font-weight: 500; text-align: center;",
                    "{title}"
                }
                {children}
            }
        }
    }
}
