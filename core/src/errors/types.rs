//! Domain-specific error types for authentication and token management
//!
//! Messages are deliberately uniform: credential failures never say whether
//! the username or the password was wrong, and token failures surfaced by the
//! lifecycle operations never say which check failed.

use cb_shared::types::response::ErrorResponse;
use thiserror::Error;

// Re-export shared ErrorResponse under the name used at the core boundary
pub use cb_shared::types::response::ErrorResponse as DomainErrorResponse;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    AuthenticationFailed,

    #[error("User not found")]
    UserNotFound,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Email already taken")]
    EmailTaken,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token is not a structurally valid JWT carrying the expected claims
    #[error("Invalid token format")]
    InvalidTokenFormat,

    /// The signature does not verify against the configured key
    #[error("Token signature verification failed")]
    InvalidSignature,

    /// Coalesced failure reported by refresh and logout
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Signing key could not be loaded: {message}")]
    KeyLoadError { message: String },
}

/// Validation errors for registration and credential input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid email format")]
    InvalidEmail,
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let error_code = match &err {
            AuthError::AuthenticationFailed => "AUTHENTICATION_FAILED",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::UsernameTaken => "USERNAME_TAKEN",
            AuthError::EmailTaken => "EMAIL_TAKEN",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let error_code = match &err {
            TokenError::InvalidTokenFormat
            | TokenError::InvalidSignature
            | TokenError::InvalidToken => "INVALID_TOKEN",
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
            TokenError::KeyLoadError { .. } => "INTERNAL_ERROR",
        };

        // Signature and format failures share one outward message
        let message = match &err {
            TokenError::InvalidTokenFormat | TokenError::InvalidSignature => {
                TokenError::InvalidToken.to_string()
            }
            TokenError::KeyLoadError { .. } => "Internal server error".to_string(),
            _ => err.to_string(),
        };

        ErrorResponse::new(error_code, message)
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        match &err {
            ValidationError::RequiredField { field } => {
                ErrorResponse::new("REQUIRED_FIELD", err.to_string()).with_detail("field", field)
            }
            ValidationError::InvalidEmail => ErrorResponse::new("INVALID_EMAIL", err.to_string()),
        }
    }
}
