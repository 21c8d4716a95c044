//! In-memory session store for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::models::Session;
use crate::traits::{SessionStore, SessionStoreError};

/// In-memory session store with switchable failures.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    session: Arc<Mutex<Option<Session>>>,
    save_should_fail: Arc<Mutex<bool>>,
    clear_should_fail: Arc<Mutex<bool>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a session.
    pub fn with_session(session: Session) -> Self {
        let store = Self::default();
        store.set_session(Some(session));
        store
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }

    /// Get the stored session synchronously (for testing).
    pub fn session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    /// Set the stored session synchronously (for testing).
    pub fn set_session(&self, session: Option<Session>) {
        *self.session.lock().unwrap() = session;
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.session())
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(SessionStoreError::SaveFailed("Mock save failure".to_string()));
        }
        self.set_session(Some(session.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        if *self.clear_should_fail.lock().unwrap() {
            return Err(SessionStoreError::ClearFailed("Mock clear failure".to_string()));
        }
        self.set_session(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use uuid::Uuid;

    fn session() -> Session {
        Session {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: None,
            user: User {
                id: Uuid::new_v4(),
                email: None,
                user_metadata: Default::default(),
            },
        }
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = InMemorySessionStore::new();
        assert!(store.load().await.unwrap().is_none());

        let s = session();
        store.save(&s).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(s));

        store.clear().await.unwrap();
        assert!(store.session().is_none());
    }

    #[tokio::test]
    async fn test_failures() {
        let store = InMemorySessionStore::with_session(session());
        store.set_clear_should_fail(true);
        assert!(store.clear().await.is_err());
        assert!(store.session().is_some());

        store.set_save_should_fail(true);
        assert!(store.save(&session()).await.is_err());
    }
}
