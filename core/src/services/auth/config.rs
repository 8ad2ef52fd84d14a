//! Configuration for the authentication service

use cb_shared::config::{AuthConfig, TokenPolicyConfig};

/// Configuration for the authentication service
#[derive(Debug, Clone, Default)]
pub struct AuthServiceConfig {
    /// When the revocation counter moves
    pub token_policy: TokenPolicyConfig,
}

impl AuthServiceConfig {
    pub fn new(token_policy: TokenPolicyConfig) -> Self {
        Self { token_policy }
    }

    /// Whether refresh is single-use
    pub fn rotate_on_refresh(&self) -> bool {
        self.token_policy.rotate_on_refresh
    }

    /// Whether logout revokes outstanding tokens
    pub fn revoke_on_logout(&self) -> bool {
        self.token_policy.revoke_on_logout
    }

    /// Whether logout accepts an expired token with a matching counter
    pub fn logout_accepts_expired(&self) -> bool {
        self.token_policy.logout_accepts_expired
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self::new(config.token_policy)
    }
}
