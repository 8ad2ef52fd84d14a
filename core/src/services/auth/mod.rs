//! Authentication service module
//!
//! This module owns the token lifecycle:
//! - Login with username and password
//! - Single-use refresh (rotation)
//! - Logout and administrative revocation through the revocation counter
//! - Registration and password change
//! - Seeding of development users

mod config;
mod seed;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use seed::{seed_default_users, DEFAULT_USER_PASSWORD};
pub use service::AuthService;
