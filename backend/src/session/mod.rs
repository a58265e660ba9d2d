//! Server-side session management
//!
//! A session binds an opaque identifier, carried by a signed client cookie,
//! to the authenticated user with an expiry. The store is an injected
//! abstraction so the in-memory implementation can be swapped for Redis
//! without touching route logic.

mod cookie;
mod memory;
mod redis;

pub use cookie::{build_session_cookie, clear_session_cookie, sign_session_id, verify_signed_value};
pub use memory::MemorySessionStore;
pub use redis::RedisSessionStore;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// Session time-to-live: 1 hour from creation.
pub const SESSION_TTL_SECS: i64 = 3600;

/// The authenticated identity carried by a session.
///
/// Deliberately excludes the password hash: the credential digest never
/// enters the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

/// A stored session entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session for `user`, expiring `ttl_secs` from now.
    pub fn new(user: SessionUser, ttl_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            user,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_secs),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Server-side authority for "is this caller logged in, and as whom".
///
/// Implementations must keep per-key consistency under concurrent access;
/// no atomicity across different session IDs is required.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Allocate a fresh opaque session ID bound to `user`.
    async fn create(&self, user: SessionUser) -> Result<String, ApiError>;

    /// Resolve a session ID. Expired or unknown sessions are absent.
    async fn get(&self, session_id: &str) -> Result<Option<SessionUser>, ApiError>;

    /// Remove a session unconditionally. Idempotent.
    async fn destroy(&self, session_id: &str) -> Result<(), ApiError>;
}

/// Allocate a new opaque, unguessable session identifier.
pub(crate) fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    #[test]
    fn test_session_not_expired() {
        let session = Session::new(test_user(), SESSION_TTL_SECS);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_session_expired() {
        let mut session = Session::new(test_user(), SESSION_TTL_SECS);
        session.expires_at = Utc::now() - Duration::hours(1);
        assert!(session.is_expired());
    }

    #[test]
    fn test_session_ids_are_distinct() {
        assert_ne!(new_session_id(), new_session_id());
    }
}
