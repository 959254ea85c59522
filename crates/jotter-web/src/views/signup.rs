//! Account registration page

use dioxus::prelude::*;
use jotter_core::forms::SignupFormState;
use jotter_core::guard::View;

use super::login::AuthCard;
use crate::app::{AppServices, Route};
use crate::styles::{ALERT_ERROR, INPUT, PRIMARY_BUTTON};

#[component]
pub fn Signup() -> Element {
    let services = use_context::<AppServices>();
    let navigator = use_navigator();
    let mut form = use_signal(SignupFormState::default);

    let onsubmit = move |event: FormEvent| {
        event.prevent_default();
        let Some(credentials) = form.write().begin_submit() else {
            return;
        };
        let services = services.clone();
        spawn(async move {
            let result = services
                .session()
                .sign_up(&credentials.email, &credentials.password)
                .await;
            let next = form.write().finish_submit(&result);
            let Some(view) = next else {
                return;
            };
            if view == View::Login {
                if let Some(notice) = form.read().notice.clone() {
                    alert(&notice);
                }
            }
            navigator.push(Route::from(view));
        });
    };

    let current = form.read().clone();

    rsx! {
        AuthCard {
            title: "Create account",

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
                    style: "{INPUT} margin-bottom: 12px;",
                    r#type: "password",
                    placeholder: "Password",
                    autocomplete: "new-password",
                    value: "{current.password}",
                    disabled: current.submitting,
                    oninput: move |evt: FormEvent| form.write().password = evt.value(),
                }
                input {
                    style: "{INPUT} margin-bottom: 20px;",
                    r#type: "password",
                    placeholder: "Confirm password",
                    autocomplete: "new-password",
                    value: "{current.confirm_password}",
                    disabled: current.submitting,
                    oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                }
                button {
                    style: "{PRIMARY_BUTTON} width: 100%;",
                    r#type: "submit",
                    disabled: current.submitting,
                    if current.submitting { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                style: "margin: 16px 0 0; text-align: center; font-size: 14px;",
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}

fn alert(message: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(error) = window.alert_with_message(message) {
        tracing::warn!("Could not show alert: {:?}", error);
    }
}
