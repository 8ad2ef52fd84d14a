//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, DomainErrorResponse as ErrorResponse, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Auth(e) => e.into(),
            DomainError::Token(e) => e.into(),
            DomainError::ValidationErr(e) => e.into(),
            DomainError::Validation { message } => ErrorResponse::new("VALIDATION_ERROR", message),
            DomainError::NotFound { resource } => {
                ErrorResponse::new("NOT_FOUND", format!("Resource not found: {}", resource))
            }
            // Store and internal failures never expose their cause
            DomainError::Database { .. } | DomainError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "Internal server error")
            }
        }
    }
}
