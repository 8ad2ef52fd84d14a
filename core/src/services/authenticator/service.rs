//! Request authenticator implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::domain::value_objects::{AuthResult, RejectReason};
use crate::errors::{DomainError, TokenError};
use crate::repositories::UserRepository;
use crate::services::token::TokenCodec;

/// Case-sensitive scheme prefix of the `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization` header value
///
/// Returns `None` when the header is absent, lacks the exact `Bearer ` prefix,
/// or carries nothing after it.
pub fn extract_bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
}

/// Turns an inbound bearer credential into an `AuthResult`
///
/// Read-only: it never moves a revocation counter, so it is safe to call
/// concurrently and repeatedly for the same token.
pub struct RequestAuthenticator<U: UserRepository> {
    user_repository: Arc<U>,
    codec: Arc<TokenCodec>,
}

impl<U: UserRepository> Clone for RequestAuthenticator<U> {
    fn clone(&self) -> Self {
        Self {
            user_repository: self.user_repository.clone(),
            codec: self.codec.clone(),
        }
    }
}

impl<U: UserRepository> RequestAuthenticator<U> {
    pub fn new(user_repository: Arc<U>, codec: Arc<TokenCodec>) -> Self {
        Self {
            user_repository,
            codec,
        }
    }

    /// Authenticate an `Authorization` header value
    ///
    /// Checks run in this order, the first failure deciding the reason:
    /// bearer prefix, signature and shape, subject lookup, expiry, counter.
    ///
    /// # Arguments
    ///
    /// * `header` - Raw header value, `None` when the request carried none
    ///
    /// # Returns
    ///
    /// * `AuthResult::Authenticated` - Principal from the directory, roles from the token
    /// * `AuthResult::Rejected(RejectReason::Malformed)` - No usable bearer
    ///   credential; callers may still serve public routes anonymously
    /// * `AuthResult::Rejected(_)` - Any other failed check
    pub async fn authenticate(&self, header: Option<&str>) -> AuthResult {
        self.authenticate_at(header, Utc::now()).await
    }

    /// `authenticate` evaluated at an explicit time
    pub async fn authenticate_at(&self, header: Option<&str>, now: DateTime<Utc>) -> AuthResult {
        let token = match extract_bearer_token(header) {
            Some(token) => token,
            None => return AuthResult::Rejected(RejectReason::Malformed),
        };

        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(DomainError::Token(TokenError::InvalidSignature)) => {
                return AuthResult::Rejected(RejectReason::SignatureInvalid)
            }
            Err(_) => return AuthResult::Rejected(RejectReason::Malformed),
        };

        let principal = match self.user_repository.find_by_username(&claims.sub).await {
            Ok(Some(principal)) => principal,
            Ok(None) => return AuthResult::Rejected(RejectReason::UserNotFound),
            Err(e) => {
                // Fail closed when the directory cannot answer
                error!("User lookup failed during authentication: {}", e);
                return AuthResult::Rejected(RejectReason::UserNotFound);
            }
        };

        if claims.is_expired_at(now) {
            return AuthResult::Rejected(RejectReason::Expired);
        }

        if claims.token_version != principal.token_version {
            debug!(
                username = %claims.sub,
                presented = claims.token_version,
                current = principal.token_version,
                "Revoked token presented"
            );
            return AuthResult::Rejected(RejectReason::RevocationMismatch);
        }

        AuthResult::Authenticated {
            principal,
            roles: claims.roles,
        }
    }
}
