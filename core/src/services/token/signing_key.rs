//! Symmetric signing key for JWT signing and verification

use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::errors::{DomainError, TokenError};

/// Minimum secret length in bytes for HMAC-SHA signing
pub const MIN_SECRET_LENGTH: usize = 32;

/// Process-wide HMAC key. Loaded once at startup and read-only afterwards.
#[derive(Clone)]
pub struct SigningKey {
    /// Key used to sign tokens
    encoding_key: EncodingKey,
    /// Key used to verify tokens
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

impl SigningKey {
    /// Builds a signing key from a shared secret
    ///
    /// # Arguments
    ///
    /// * `secret` - The shared secret; its UTF-8 bytes are the key material
    ///
    /// # Returns
    ///
    /// * `Ok(SigningKey)` - Key ready for signing and verification
    /// * `Err(DomainError)` - `TokenError::KeyLoadError` when the secret is
    ///   empty, blank, or shorter than `MIN_SECRET_LENGTH` bytes
    ///
    /// # Example
    ///
    /// ```
    /// use cb_core::services::token::SigningKey;
    ///
    /// assert!(SigningKey::from_secret("").is_err());
    /// assert!(SigningKey::from_secret("0123456789abcdef0123456789abcdef").is_ok());
    /// ```
    pub fn from_secret(secret: &str) -> Result<Self, DomainError> {
        if secret.trim().is_empty() {
            return Err(key_error("signing secret is empty"));
        }
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(key_error(&format!(
                "signing secret must be at least {} bytes, got {}",
                MIN_SECRET_LENGTH,
                secret.len()
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

fn key_error(message: &str) -> DomainError {
    DomainError::Token(TokenError::KeyLoadError {
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_blank_secret_rejected() {
        for secret in ["", "   ", "\n\t"] {
            let result = SigningKey::from_secret(secret);
            assert!(matches!(
                result,
                Err(DomainError::Token(TokenError::KeyLoadError { .. }))
            ));
        }
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = SigningKey::from_secret("too-short");
        match result {
            Err(DomainError::Token(TokenError::KeyLoadError { message })) => {
                assert!(message.contains("32"));
            }
            other => panic!("expected KeyLoadError, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = "a-very-long-secret-that-must-not-leak-0001";
        let key = SigningKey::from_secret(secret).unwrap();
        let debug = format!("{:?}", key);

        assert!(!debug.contains(secret));
        assert!(debug.starts_with("SigningKey"));
    }
}
