//! Shared configuration and common types for the Collabrium server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Structured error and health responses

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, DirectoryBackend, Environment, JwtConfig,
    LoggingConfig, ServerConfig, TokenPolicyConfig,
};
pub use types::{ErrorResponse, HealthResponse, HealthStatus};
