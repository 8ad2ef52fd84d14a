//! Mapping of core errors and rejected credentials to HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use cb_core::domain::value_objects::RejectReason;
use cb_core::errors::{AuthError, DomainError, TokenError};
use cb_shared::ErrorResponse;
use thiserror::Error;
use tracing::error;

/// Error type returned by handlers and extractors
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable credential on a route that requires one
    ///
    /// Carries the authenticator's reason when a credential was presented.
    #[error("Authentication required")]
    Unauthenticated(Option<RejectReason>),

    /// Error surfaced by the core
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            ApiError::Unauthenticated(reason) => unauthenticated_response(*reason),
            ApiError::Domain(error) => ErrorResponse::from(error.clone()),
        }
    }
}

/// Body for a rejected or missing credential
///
/// Only expiry is distinguished; every other failed check shares one code.
fn unauthenticated_response(reason: Option<RejectReason>) -> ErrorResponse {
    match reason {
        None | Some(RejectReason::Malformed) => {
            ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication required")
        }
        Some(RejectReason::Expired) => ErrorResponse::from(TokenError::TokenExpired),
        Some(_) => ErrorResponse::from(TokenError::InvalidToken),
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Domain(error) => domain_status(error),
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if let ApiError::Domain(error) = self {
            if status.is_server_error() {
                error!("Request failed: {}", error);
            }
        }
        HttpResponse::build(status).json(self.to_error_response())
    }
}

fn domain_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(AuthError::AuthenticationFailed) => StatusCode::UNAUTHORIZED,
        DomainError::Auth(AuthError::UserNotFound) => StatusCode::NOT_FOUND,
        DomainError::Auth(AuthError::UsernameTaken | AuthError::EmailTaken) => StatusCode::CONFLICT,
        DomainError::Token(
            TokenError::TokenGenerationFailed | TokenError::KeyLoadError { .. },
        ) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_core::errors::ValidationError;

    #[test]
    fn test_unauthenticated_codes() {
        assert_eq!(
            unauthenticated_response(None).error,
            "AUTHENTICATION_REQUIRED"
        );
        assert_eq!(
            unauthenticated_response(Some(RejectReason::Malformed)).error,
            "AUTHENTICATION_REQUIRED"
        );
        assert_eq!(
            unauthenticated_response(Some(RejectReason::Expired)).error,
            "TOKEN_EXPIRED"
        );
        for reason in [
            RejectReason::SignatureInvalid,
            RejectReason::RevocationMismatch,
            RejectReason::UserNotFound,
        ] {
            assert_eq!(unauthenticated_response(Some(reason)).error, "INVALID_TOKEN");
        }
    }

    #[test]
    fn test_domain_status_codes() {
        let cases = [
            (DomainError::Auth(AuthError::AuthenticationFailed), 401),
            (DomainError::Auth(AuthError::UserNotFound), 404),
            (DomainError::Auth(AuthError::EmailTaken), 409),
            (DomainError::Token(TokenError::TokenExpired), 401),
            (DomainError::Token(TokenError::TokenGenerationFailed), 500),
            (
                DomainError::ValidationErr(ValidationError::InvalidEmail),
                400,
            ),
            (
                DomainError::Database {
                    message: "connection reset".to_string(),
                },
                500,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status_code().as_u16(), status);
        }
    }

    #[test]
    fn test_database_message_not_exposed() {
        let error = ApiError::from(DomainError::Database {
            message: "duplicate entry 'secret'".to_string(),
        });

        let body = error.to_error_response();
        assert_eq!(body.error, "INTERNAL_ERROR");
        assert!(!body.message.contains("secret"));
    }
}
