//! Session gate wrapped around protected views

use dioxus::prelude::*;
use jotter_core::guard::{GuardDecision, GuardState};
use jotter_core::Session;

use super::Spinner;
use crate::app::{AppServices, Route};

/// Renders `children` only once a session is confirmed.
///
/// While the lookup is pending a loading indicator is shown; without a
/// session the router is sent to the login view and nothing is rendered.
/// The confirmed session is provided to descendants as
/// `Signal<Option<Session>>`.
#[component]
pub fn AuthRequired(children: Element) -> Element {
    let services = use_context::<AppServices>();
    let navigator = use_navigator();
    let mut session = use_signal(|| None::<Session>);
    use_context_provider(|| session);

    let decision = use_resource(move || {
        let guard = services.guard();
        async move { guard.check().await }
    });

    use_effect(move || match (*decision.read()).clone() {
        Some(GuardDecision::Allow(current)) => session.set(Some(current)),
        Some(GuardDecision::Redirect(view)) => {
            navigator.replace(Route::from(view));
        }
        None => {}
    });

    let phase = (*decision.read())
        .clone()
        .map_or(GuardState::Resolving, GuardState::from);

    if phase.renders_content() {
        rsx! { {children} }
    } else if phase == GuardState::Resolving {
        rsx! { Spinner {} }
    } else {
        rsx! {}
    }
}
