//! Redis-backed session store
//!
//! Stores each session as a JSON payload under a `session:` key with the
//! TTL applied by Redis itself (`SET ... EX`), so expiry needs no eviction
//! logic on our side.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};

use super::{new_session_id, Session, SessionStore, SessionUser};
use crate::error::ApiError;

/// Session store backed by a shared Redis connection.
pub struct RedisSessionStore {
    conn: ConnectionManager,
    ttl_secs: i64,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager, ttl_secs: i64) -> Self {
        Self { conn, ttl_secs }
    }

    fn key(session_id: &str) -> String {
        format!("session:{}", session_id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, user: SessionUser) -> Result<String, ApiError> {
        let session_id = new_session_id();
        let session = Session::new(user, self.ttl_secs);
        let payload = serde_json::to_string(&session)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Session serialization: {}", e)))?;

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(Self::key(&session_id), payload, self.ttl_secs as u64)
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Redis SET failed: {}", e)))?;

        Ok(session_id)
    }

    async fn get(&self, session_id: &str) -> Result<Option<SessionUser>, ApiError> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn
            .get(Self::key(session_id))
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Redis GET failed: {}", e)))?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        let session: Session = serde_json::from_str(&payload)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Session deserialization: {}", e)))?;

        // Redis TTL already expires entries; the timestamp check covers
        // clock drift between writers.
        if session.is_expired() {
            return Ok(None);
        }

        Ok(Some(session.user))
    }

    async fn destroy(&self, session_id: &str) -> Result<(), ApiError> {
        let mut conn = self.conn.clone();
        // DEL on a missing key is a no-op, which gives us idempotence
        conn.del::<_, ()>(Self::key(session_id))
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Redis DEL failed: {}", e)))?;
        Ok(())
    }
}
