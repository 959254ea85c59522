//! Main application component and routing

use dioxus::prelude::*;
use jotter_core::{NotesRepository, RouteGuard, SessionClient, SupabaseClient, View};
use std::sync::Arc;

use crate::bootstrap_config::load_bootstrap_config;
use crate::session_store::LocalStorageSessionStore;
use crate::views::{Login, Notes, Signup};

pub type Backend = SupabaseClient<LocalStorageSessionStore>;

#[derive(Debug, Clone, Routable, PartialEq, Eq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Notes {},
    #[route("/login")]
    Login {},
    #[route("/signup")]
    Signup {},
}

impl From<View> for Route {
    fn from(view: View) -> Self {
        match view {
            View::Notes => Self::Notes {},
            View::Login => Self::Login {},
            View::Signup => Self::Signup {},
        }
    }
}

/// Backend-facing services, built once and shared through context.
#[derive(Clone)]
pub struct AppServices {
    pub repository: NotesRepository<Backend>,
}

impl AppServices {
    fn new() -> Self {
        let bootstrap = load_bootstrap_config();
        let client = SupabaseClient::from_optional_config(
            bootstrap.client_config().as_ref(),
            LocalStorageSessionStore::default(),
        );
        if client.is_configured() {
            tracing::info!("Supabase client configured");
        }
        Self {
            repository: NotesRepository::new(Arc::new(client)),
        }
    }

    pub const fn session(&self) -> &SessionClient<Backend> {
        self.repository.session()
    }

    pub fn guard(&self) -> RouteGuard<Backend> {
        RouteGuard::new(self.session().clone())
    }
}

/// Root application component
#[component]
pub fn App() -> Element {
    use_context_provider(AppServices::new);

    rsx! {
        div {
            style: "
                min-height: 100vh;
                background: #f5f5f5;
                color: #212121;
                font-family: system-ui, -apple-system, sans-serif;
            ",
            Router::<Route> {}
        }
    }
}
