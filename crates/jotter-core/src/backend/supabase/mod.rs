//! Supabase client: GoTrue for identity, PostgREST for the `notes` table.
//!
//! Constructed explicitly from a [`ClientConfig`] and shared by reference;
//! there is no global instance. Without configuration the client still
//! exists but refuses every call with [`AuthError::NotConfigured`].

mod auth;
mod rest;

use reqwest::{Client, RequestBuilder};

use crate::auth::{AuthError, AuthResult, AuthSession, SessionPersistence};
use crate::config::ClientConfig;

pub use auth::normalize_auth_url;
pub use rest::normalize_rest_url;

#[derive(Debug, Clone)]
struct Endpoints {
    auth_url: String,
    rest_url: String,
    anon_key: String,
}

#[derive(Clone)]
pub struct SupabaseClient<S: SessionPersistence> {
    endpoints: Option<Endpoints>,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> SupabaseClient<S> {
    pub fn new(config: &ClientConfig, store: S) -> AuthResult<Self> {
        let auth_url = normalize_auth_url(&config.supabase_url)?;
        let rest_url = normalize_rest_url(&config.supabase_url)?;
        let anon_key = config.supabase_anon_key.trim().to_string();
        if anon_key.is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Supabase anon key must not be empty",
            ));
        }

        Ok(Self {
            endpoints: Some(Endpoints {
                auth_url,
                rest_url,
                anon_key,
            }),
            client: Client::builder().build()?,
            store,
        })
    }

    /// A client that fails every call; used when configuration is missing.
    pub fn unconfigured(store: S) -> Self {
        Self {
            endpoints: None,
            client: Client::new(),
            store,
        }
    }

    /// Build from optional configuration, degrading to an unconfigured client.
    pub fn from_optional_config(config: Option<&ClientConfig>, store: S) -> Self {
        let Some(config) = config else {
            return Self::unconfigured(store);
        };
        match Self::new(config, store.clone()) {
            Ok(client) => client,
            Err(error) => {
                tracing::error!("Failed to build Supabase client: {}", error);
                Self::unconfigured(store)
            }
        }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.endpoints.is_some()
    }

    fn endpoints(&self) -> AuthResult<&Endpoints> {
        self.endpoints.as_ref().ok_or(AuthError::NotConfigured)
    }

    fn public_request(&self, endpoints: &Endpoints, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &endpoints.anon_key)
            .header("Authorization", format!("Bearer {}", endpoints.anon_key))
    }

    fn user_request(
        &self,
        endpoints: &Endpoints,
        session: &AuthSession,
        request: RequestBuilder,
    ) -> RequestBuilder {
        request
            .header("apikey", &endpoints.anon_key)
            .bearer_auth(&session.access_token)
    }

    /// Load the persisted session, refreshing it when close to expiry.
    async fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        let endpoints = self.endpoints()?;
        let Some(stored_session) = self.store.load_session()? else {
            return Ok(None);
        };

        if !stored_session.is_expired() {
            return Ok(Some(stored_session));
        }

        match self
            .refresh_session(endpoints, &stored_session.refresh_token)
            .await
        {
            Ok(refreshed) => {
                self.store.save_session(&refreshed)?;
                Ok(Some(refreshed))
            }
            Err(error) => {
                tracing::warn!("Failed to refresh persisted session: {}", error);
                self.store.clear_session()?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySessionStore;
    use crate::backend::{AuthBackend, NotesBackend};
    use crate::models::UserId;

    fn config() -> ClientConfig {
        ClientConfig {
            supabase_url: "https://demo.supabase.co".to_string(),
            supabase_anon_key: "anon".to_string(),
        }
    }

    #[test]
    fn new_derives_both_endpoints() {
        let client = SupabaseClient::new(&config(), MemorySessionStore::new()).unwrap();
        let endpoints = client.endpoints().unwrap();
        assert_eq!(endpoints.auth_url, "https://demo.supabase.co/auth/v1");
        assert_eq!(endpoints.rest_url, "https://demo.supabase.co/rest/v1");
    }

    #[test]
    fn blank_anon_key_is_rejected() {
        let mut config = config();
        config.supabase_anon_key = "  ".to_string();
        assert!(matches!(
            SupabaseClient::new(&config, MemorySessionStore::new()),
            Err(AuthError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn missing_config_degrades_to_unconfigured() {
        let client = SupabaseClient::from_optional_config(None, MemorySessionStore::new());
        assert!(!client.is_configured());
    }

    #[tokio::test]
    async fn unconfigured_client_refuses_calls() {
        let client = SupabaseClient::unconfigured(MemorySessionStore::new());
        assert!(matches!(
            client.current_user().await,
            Err(AuthError::NotConfigured)
        ));
        assert!(matches!(
            client.select_notes(&UserId::new()).await,
            Err(crate::Error::Auth(AuthError::NotConfigured))
        ));
    }

    #[tokio::test]
    async fn failed_refresh_clears_stored_session() {
        let store = MemorySessionStore::new();
        store
            .save_session(&AuthSession {
                access_token: "expired".to_string(),
                refresh_token: "refresh".to_string(),
                expires_at: 0,
                user: crate::models::Session {
                    user_id: UserId::new(),
                    email: Some("ada@example.com".to_string()),
                },
            })
            .unwrap();
        let unreachable = ClientConfig {
            supabase_url: "http://127.0.0.1:9".to_string(),
            supabase_anon_key: "anon".to_string(),
        };
        let client = SupabaseClient::new(&unreachable, store.clone()).unwrap();

        assert!(client.current_user().await.unwrap().is_none());
        assert!(store.load_session().unwrap().is_none());
    }

    #[tokio::test]
    async fn configured_client_without_stored_session_has_no_user() {
        let client = SupabaseClient::new(&config(), MemorySessionStore::new()).unwrap();
        assert!(client.current_user().await.unwrap().is_none());
    }
}
