//! Transient status message at the bottom of the page

use dioxus::prelude::*;
use gloo_timers::future::sleep;
use jotter_core::controller::{Severity, NOTIFICATION_AUTO_HIDE};
use jotter_core::ControllerState;

#[component]
pub fn Toast() -> Element {
    let mut state = use_context::<Signal<ControllerState>>();

    let visible_id = use_memo(move || {
        state
            .read()
            .notification()
            .filter(|notification| notification.visible)
            .map(|notification| notification.id)
    });

    use_effect(move || {
        if let Some(id) = visible_id() {
            spawn(async move {
                sleep(NOTIFICATION_AUTO_HIDE).await;
                state.write().dismiss(id);
            });
        }
    });

    let Some(notification) = state
        .read()
        .notification()
        .filter(|notification| notification.visible)
        .cloned()
    else {
        return rsx! {};
    };

    let background = match notification.severity {
        Severity::Success => "#2e7d32",
        Severity::Error => "#d32f2f",
    };
    let id = notification.id;

    rsx! {
        div {
            role: "status",
            "data-severity": notification.severity.as_str(),
            style: "
                position: fixed;
                left: 50%;
                bottom: 24px;
                transform: translateX(-50%);
                display: flex;
                align-items: center;
                gap: 16px;
                padding: 12px 16px;
                border-radius: 4px;
                background: {background};
                color: #ffffff;
                box-shadow: 0 3px 6px rgba(0, 0, 0, 0.3);
                z-index: 1100;
            ",

            span { "{notification.message}" }

            button {
                style: "
                    background: transparent;
                    border: none;
                    color: #ffffff;
                    font-size: 16px;
                    cursor: pointer;
                ",
                "aria-label": "Close",
                onclick: move |_| state.write().dismiss(id),
                "×"
            }
        }
    }
}
