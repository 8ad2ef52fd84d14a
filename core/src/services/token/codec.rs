//! JWT encoding and decoding

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Header, Validation};
use tracing::error;

use cb_shared::config::JwtConfig;

use crate::domain::entities::token::{Claims, IssuedToken};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenCodecConfig;
use super::signing_key::SigningKey;

/// Signs and verifies tokens with the process-wide key
///
/// Pure: no I/O and no clock reads. Freshness is left to the caller, who
/// compares `Claims::exp` against its own `now`.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    key: SigningKey,
    config: TokenCodecConfig,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec from an already loaded key
    pub fn new(key: SigningKey, config: TokenCodecConfig) -> Self {
        let mut validation = Validation::new(config.algorithm);
        // Only the signature and the claim shape are checked here
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        Self {
            key,
            config,
            validation,
        }
    }

    /// Loads the key and settings from the shared JWT configuration
    ///
    /// # Returns
    ///
    /// * `Ok(TokenCodec)` - Codec ready to serve requests
    /// * `Err(DomainError)` - Key material or settings are unusable; callers
    ///   at startup treat this as fatal
    pub fn from_config(config: &JwtConfig) -> DomainResult<Self> {
        let codec_config = TokenCodecConfig::from_jwt_config(config)?;
        let key = SigningKey::from_secret(&config.secret)?;
        Ok(Self::new(key, codec_config))
    }

    /// Lifetime given to every issued token
    pub fn token_ttl(&self) -> Duration {
        self.config.token_ttl
    }

    /// Issues a signed token
    ///
    /// # Arguments
    ///
    /// * `subject` - The principal's username
    /// * `roles` - Roles to embed, in order
    /// * `token_version` - The principal's revocation counter
    /// * `now` - Issuance time; `exp = now + ttl`
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - The compact token with its expiry
    /// * `Err(DomainError)` - `TokenError::TokenGenerationFailed`
    pub fn issue(
        &self,
        subject: &str,
        roles: Vec<String>,
        token_version: u64,
        now: DateTime<Utc>,
    ) -> DomainResult<IssuedToken> {
        let claims = Claims::new(subject, roles, token_version, now, self.config.token_ttl)?;
        let token = self.encode_claims(&claims)?;
        Ok(IssuedToken::new(token, &claims))
    }

    /// Encodes arbitrary claims with the configured key
    pub fn encode_claims(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, self.key.encoding_key()).map_err(|e| {
            error!(error = %e, "Failed to sign token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Verifies the signature and decodes the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature verified and the payload has the expected shape
    /// * `Err(TokenError::InvalidSignature)` - Signature or algorithm mismatch
    /// * `Err(TokenError::InvalidTokenFormat)` - Anything else structurally wrong
    pub fn decode(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, self.key.decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    DomainError::Token(TokenError::InvalidSignature)
                }
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })
    }
}
