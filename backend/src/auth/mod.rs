//! Authentication module
//!
//! Provides session-cookie authentication with bcrypt password hashing.

mod guard;
mod password;

pub use guard::{access_guard, resolve_session, resolve_session_id, CurrentUser};
pub use password::PasswordService;
