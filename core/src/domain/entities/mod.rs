//! Domain entities representing core business objects.

pub mod principal;
pub mod token;

// Re-export commonly used types
pub use principal::{Principal, ROLE_ADMIN, ROLE_USER};
pub use token::{Claims, IssuedToken};
