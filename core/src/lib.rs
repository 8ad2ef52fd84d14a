//! # Collabrium Core
//!
//! Authentication core for the Collabrium backend: stateless signed tokens
//! revoked through a per-user counter. This crate contains domain entities,
//! business services, repository interfaces, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
