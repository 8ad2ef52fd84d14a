//! # Infrastructure Layer
//!
//! Concrete store adapters for the Collabrium authentication core:
//! - **Database**: MySQL connection pool and user directory using SQLx

pub mod database;

pub use database::{DatabasePool, MySqlUserRepository, PoolStatistics};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
