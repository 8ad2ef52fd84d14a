//! Configuration for the token codec

use chrono::Duration;
use jsonwebtoken::Algorithm;

use cb_shared::config::JwtConfig;

use crate::errors::{DomainError, DomainResult, TokenError};

/// Longest accepted token lifetime (one year)
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Lifetime of every issued token
    pub token_ttl: Duration,
}

impl Default for TokenCodecConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::HS256,
            token_ttl: Duration::seconds(3600),
        }
    }
}

impl TokenCodecConfig {
    /// Derives codec settings from the shared JWT configuration
    ///
    /// # Returns
    ///
    /// * `Ok(TokenCodecConfig)` - Settings ready for `TokenCodec::new`
    /// * `Err(DomainError)` - Unknown or non-HMAC algorithm, or a lifetime
    ///   outside `1..=MAX_TOKEN_TTL_SECONDS`
    pub fn from_jwt_config(config: &JwtConfig) -> DomainResult<Self> {
        let algorithm = parse_hmac_algorithm(&config.algorithm)?;

        let seconds = config.token_ttl_seconds;
        let token_ttl = Duration::try_seconds(seconds)
            .filter(|_| (1..=MAX_TOKEN_TTL_SECONDS).contains(&seconds))
            .ok_or_else(|| DomainError::Validation {
                message: format!(
                    "Token lifetime must be between 1 and {} seconds, got {}",
                    MAX_TOKEN_TTL_SECONDS, seconds
                ),
            })?;

        Ok(Self {
            algorithm,
            token_ttl,
        })
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}

/// Parses an algorithm name, accepting only the symmetric HMAC family
pub(crate) fn parse_hmac_algorithm(name: &str) -> DomainResult<Algorithm> {
    match name.trim().to_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(TokenError::KeyLoadError {
            message: format!("Unsupported signing algorithm: {}", other),
        }
        .into()),
    }
}
