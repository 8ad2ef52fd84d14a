//! Type definitions shared across crates
//!
//! - `response` - Error and health check responses

pub mod response;

pub use response::{ErrorResponse, HealthResponse, HealthStatus};
