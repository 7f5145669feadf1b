//! Session store — backend-agnostic mapping from session id to session.
//!
//! The trait keeps the controller independent of the backing store so a
//! persistent or distributed implementation can be substituted. Sessions
//! are created lazily, never expired, and never survive a restart with
//! the in-memory backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::session::Session;
use crate::error::StoreError;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the session for `session_id`, creating a fresh one if absent.
    async fn get_or_create(&self, session_id: &str) -> Result<Session, StoreError>;

    /// Fetch an existing session.
    async fn get(&self, session_id: &str) -> Result<Option<Session>, StoreError>;

    /// Write a session back. Last writer wins; concurrent messages for one
    /// session are not coordinated.
    async fn update(&self, session: Session) -> Result<(), StoreError>;
}

/// Process-memory store.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, session_id: &str) -> Result<Session, StoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id));
        Ok(session.clone())
    }

    async fn get(&self, session_id: &str) -> Result<Option<Session>, StoreError> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn update(&self, session: Session) -> Result<(), StoreError> {
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session);
        Ok(())
    }
}
