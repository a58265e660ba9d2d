//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the password hasher, and the session store.

pub mod user;

pub use user::UserService;
