//! Data access layer

mod user;

pub use user::{UserRecord, UserRepository};
