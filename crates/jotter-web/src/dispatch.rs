//! Runs controller commands from event handlers.

use dioxus::prelude::*;
use jotter_core::controller::{execute, Command, ControllerState};

use crate::app::AppServices;

/// Execute `command` and every follow-up it produces, folding each outcome
/// into `state`. Returns whether the first command succeeded, or `None` if
/// there was nothing to run.
///
/// Stops early when the view owning `state` has gone away.
pub async fn run(
    mut state: Signal<ControllerState>,
    services: AppServices,
    command: Option<Command>,
) -> Option<bool> {
    let mut first = None;
    let mut next = command;
    while let Some(command) = next {
        let outcome = execute(&services.repository, command).await;
        first.get_or_insert(outcome.is_success());
        let Ok(mut current) = state.try_write() else {
            tracing::debug!("Notes view closed, dropping outcome");
            break;
        };
        next = current.apply(outcome);
    }
    first
}

/// Fire-and-forget variant of [`run`].
///
/// Runs on the root scope so that closing the form or dialog that issued the
/// command does not cancel its follow-up refresh.
pub fn dispatch(state: Signal<ControllerState>, services: AppServices, command: Option<Command>) {
    if command.is_none() {
        return;
    }
    spawn_forever(async move {
        run(state, services, command).await;
    });
}
