//! Value objects representing immutable domain concepts.

pub mod auth_result;
pub mod registration;

// Re-export commonly used types
pub use auth_result::{AuthResult, RejectReason};
pub use registration::RegistrationCandidate;
