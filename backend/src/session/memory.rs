//! In-memory session store
//!
//! Process-wide map from session ID to session entry. Eviction is lazy:
//! an expired entry is removed the first time it is looked up, and is
//! never returned.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{new_session_id, Session, SessionStore, SessionUser, SESSION_TTL_SECS};
use crate::error::ApiError;

/// Session store backed by a `RwLock`ed map.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl_secs: i64,
}

impl MemorySessionStore {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl_secs,
        }
    }

    /// Number of live (non-expired) entries. Test helper.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.values().filter(|s| !s.is_expired()).count()
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(SESSION_TTL_SECS)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user: SessionUser) -> Result<String, ApiError> {
        let session_id = new_session_id();
        let session = Session::new(user, self.ttl_secs);
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.clone(), session);
        Ok(session_id)
    }

    async fn get(&self, session_id: &str) -> Result<Option<SessionUser>, ApiError> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                Some(session) if !session.is_expired() => {
                    return Ok(Some(session.user.clone()));
                }
                Some(_) => {} // expired, evict below
                None => return Ok(None),
            }
        }
        // Lazy eviction of the expired entry
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(None)
    }

    async fn destroy(&self, session_id: &str) -> Result<(), ApiError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(())
    }
}
