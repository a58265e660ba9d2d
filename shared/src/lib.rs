//! Auth Gateway Shared Library
//!
//! This crate contains the API request/response types and input validation
//! helpers shared between the backend and its integration tests.

pub mod types;
pub mod validation;

// Re-export commonly used items
pub use types::*;
