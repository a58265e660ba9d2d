//! Input validation functions
//!
//! Registration requires each field to be present and non-empty; any
//! non-empty value is acceptable. Email format and password strength are
//! the caller's concern, not the gateway's.

/// Validate a username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    Ok(())
}

/// Validate an email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    Ok(())
}

/// Validate a password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    Ok(())
}
