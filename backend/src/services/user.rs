//! User service for registration, authentication, and session lifecycle
//!
//! # Performance Optimizations
//!
//! - Password hashing/verification runs on blocking thread pool
//! - Database queries use connection pooling

use crate::auth::PasswordService;
use crate::error::ApiError;
use crate::repositories::{UserRecord, UserRepository};
use crate::session::{SessionStore, SessionUser};
use auth_gateway_shared::types::UserResponse;
use auth_gateway_shared::validation;
use sqlx::PgPool;

/// Result of a successful login: the allocated session ID plus the
/// welcome message for the response body.
pub struct LoginOutcome {
    pub session_id: String,
    pub message: String,
}

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// All three fields must be present and non-empty; the stored password
    /// is the bcrypt digest, never the plaintext.
    pub async fn register(
        pool: &PgPool,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserResponse, ApiError> {
        if validation::validate_username(username).is_err()
            || validation::validate_email(email).is_err()
            || validation::validate_password(password).is_err()
        {
            return Err(ApiError::Validation(
                "Please enter username, email and password.".to_string(),
            ));
        }

        // Hash password on blocking thread pool (CPU-intensive)
        let password_owned = password.to_string();
        let password_hash = PasswordService::hash_async(password_owned)
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, username, email, &password_hash)
            .await
            .map_err(ApiError::Internal)?;

        Ok(to_response(user))
    }

    /// Login with username and password
    ///
    /// The two failure messages are deliberately distinct ("does not
    /// exist" vs "Incorrect password"); no session is created on either.
    pub async fn login(
        pool: &PgPool,
        sessions: &dyn SessionStore,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, ApiError> {
        let user = UserRepository::find_by_username(pool, username)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                ApiError::Unauthorized(format!("User {} does not exist.", username))
            })?;

        // Verify password on blocking thread pool (CPU-intensive)
        let password_owned = password.to_string();
        let hash_owned = user.password_hash.clone();
        let valid = PasswordService::verify_async(password_owned, hash_owned)
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized("Incorrect password".to_string()));
        }

        // The session payload carries the sanitized identity only; the
        // credential digest stays in the credential store.
        let session_user = SessionUser {
            id: user.id,
            username: user.username.clone(),
            email: user.email,
        };
        let session_id = sessions.create(session_user).await?;

        Ok(LoginOutcome {
            session_id,
            message: format!("Welcome back {} :)", user.username),
        })
    }

    /// Destroy the caller's session, if it has one
    ///
    /// Logging out without a session is not an error.
    pub async fn logout(
        sessions: &dyn SessionStore,
        session_id: Option<&str>,
    ) -> Result<(), ApiError> {
        if let Some(session_id) = session_id {
            sessions.destroy(session_id).await?;
        }
        Ok(())
    }

    /// List all registered users, in creation order
    pub async fn list_users(pool: &PgPool) -> Result<Vec<UserResponse>, ApiError> {
        let users = UserRepository::list_all(pool)
            .await
            .map_err(ApiError::Internal)?;

        Ok(users.into_iter().map(to_response).collect())
    }
}

fn to_response(user: UserRecord) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        password_hash: user.password_hash,
        created_at: user.created_at,
    }
}

#[cfg(test)]
mod tests {
    // Database-backed flows are covered in tests/auth_flow_test.rs
}
