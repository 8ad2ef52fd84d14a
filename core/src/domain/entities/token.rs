//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TokenError;

/// Claims structure for JWT payload
///
/// The payload is a flat map with exactly these keys; decoding rejects any
/// token whose shape differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Roles granted at issuance time
    pub roles: Vec<String>,

    /// Revocation counter at issuance time
    #[serde(rename = "tokenVersion")]
    pub token_version: u64,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims issued at `now` that expire after `ttl`
    ///
    /// # Arguments
    ///
    /// * `subject` - The principal's username
    /// * `roles` - Roles to embed, in order
    /// * `token_version` - The principal's current revocation counter
    /// * `now` - Issuance time
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    ///
    /// * `Err(TokenError::TokenGenerationFailed)` - `now + ttl` is out of range
    pub fn new(
        subject: impl Into<String>,
        roles: Vec<String>,
        token_version: u64,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(TokenError::TokenGenerationFailed)?;

        Ok(Self {
            sub: subject.into(),
            roles,
            token_version,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Checks if the token is expired at `now` (`now >= exp`)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Issuance as a timestamp
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_default()
    }
}

/// A freshly signed token handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Compact JWT (header.payload.signature)
    pub token: String,

    /// Token type, always "Bearer"
    pub token_type: String,

    /// Expiration time of the token
    pub expires_at: DateTime<Utc>,

    /// Lifetime in seconds
    pub expires_in: i64,
}

impl IssuedToken {
    pub fn new(token: String, claims: &Claims) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_at: claims.expires_at(),
            expires_in: claims.exp - claims.iat,
        }
    }
}
