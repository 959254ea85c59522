//! Browser session persistence using `window.localStorage`.

use jotter_core::auth::{AuthError, AuthResult, AuthSession, SessionPersistence};
use web_sys::Storage;

const SESSION_KEY: &str = "jotter.session";

/// Keeps the Supabase session across page loads, like the JS SDK does.
#[derive(Debug, Clone)]
pub struct LocalStorageSessionStore {
    key: &'static str,
}

impl Default for LocalStorageSessionStore {
    fn default() -> Self {
        Self { key: SESSION_KEY }
    }
}

impl LocalStorageSessionStore {
    fn storage() -> AuthResult<Storage> {
        web_sys::window()
            .ok_or_else(|| AuthError::SessionStorage("window is not available".to_string()))?
            .local_storage()
            .map_err(|error| AuthError::SessionStorage(format!("{error:?}")))?
            .ok_or_else(|| AuthError::SessionStorage("localStorage is disabled".to_string()))
    }
}

impl SessionPersistence for LocalStorageSessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(self.key)
            .map_err(|error| AuthError::SessionStorage(format!("{error:?}")))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(error) => {
                tracing::warn!("Discarding unreadable stored session: {}", error);
                self.clear_session()?;
                Ok(None)
            }
        }
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let serialized = serde_json::to_string(session)?;
        Self::storage()?
            .set_item(self.key, &serialized)
            .map_err(|error| AuthError::SessionStorage(format!("{error:?}")))
    }

    fn clear_session(&self) -> AuthResult<()> {
        Self::storage()?
            .remove_item(self.key)
            .map_err(|error| AuthError::SessionStorage(format!("{error:?}")))
    }
}
