//! Where a signed-in session lives between calls.

use std::sync::{Arc, Mutex};

use super::{AuthError, AuthResult, AuthSession};

pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> AuthResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear_session(&self) -> AuthResult<()>;
}

/// Process-local session store. Lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<AuthSession>>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionPersistence for MemorySessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let slot = self
            .slot
            .lock()
            .map_err(|error| AuthError::SessionStorage(error.to_string()))?;
        Ok(slot.clone())
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|error| AuthError::SessionStorage(error.to_string()))?;
        *slot = Some(session.clone());
        Ok(())
    }

    fn clear_session(&self) -> AuthResult<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|error| AuthError::SessionStorage(error.to_string()))?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Session, UserId};

    #[test]
    fn save_load_clear() {
        let store = MemorySessionStore::new();
        assert!(store.load_session().unwrap().is_none());

        let session = AuthSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: 42,
            user: Session {
                user_id: UserId::new(),
                email: Some("ada@example.com".to_string()),
            },
        };
        store.save_session(&session).unwrap();
        assert_eq!(store.clone().load_session().unwrap(), Some(session));

        store.clear_session().unwrap();
        assert!(store.load_session().unwrap().is_none());
    }
}
