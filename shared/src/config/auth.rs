//! Authentication and token policy configuration

use serde::{Deserialize, Serialize};

use super::{env_parsed, ConfigError};

/// Secret used when `JWT_SECRET` is not provided. Only acceptable for local development.
pub const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret the signing key is derived from
    pub secret: String,

    /// Token lifetime in seconds
    pub token_ttl_seconds: i64,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_SECRET),
            token_ttl_seconds: 3600, // 1 hour
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token lifetime in minutes
    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.token_ttl_seconds = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }

    /// Create from environment variables
    ///
    /// An unset `JWT_EXPIRATION_SECONDS` means the default lifetime; a set
    /// but unparsable one is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| DEVELOPMENT_SECRET.to_string());
        let token_ttl_seconds = env_parsed("JWT_EXPIRATION_SECONDS")?.unwrap_or(3600);

        Ok(Self {
            secret,
            token_ttl_seconds,
            algorithm: default_algorithm(),
        })
    }
}

/// Revocation counter policy.
///
/// Replaces per-profile behaviour switches: every environment runs the same
/// code path and only these flags decide whether the counter moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenPolicyConfig {
    /// Increment the revocation counter on refresh, making refresh single-use
    #[serde(default = "default_true")]
    pub rotate_on_refresh: bool,

    /// Increment the revocation counter on logout
    #[serde(default = "default_true")]
    pub revoke_on_logout: bool,

    /// Accept expired (but otherwise valid) tokens on logout
    #[serde(default)]
    pub logout_accepts_expired: bool,
}

impl Default for TokenPolicyConfig {
    fn default() -> Self {
        Self {
            rotate_on_refresh: true,
            revoke_on_logout: true,
            logout_accepts_expired: false,
        }
    }
}

impl TokenPolicyConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rotate_on_refresh: env_flag("AUTH_ROTATE_ON_REFRESH", defaults.rotate_on_refresh),
            revoke_on_logout: env_flag("AUTH_REVOKE_ON_LOGOUT", defaults.revoke_on_logout),
            logout_accepts_expired: env_flag(
                "AUTH_LOGOUT_ACCEPTS_EXPIRED",
                defaults.logout_accepts_expired,
            ),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Revocation counter policy
    #[serde(default)]
    pub token_policy: TokenPolicyConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            token_policy: TokenPolicyConfig::from_env(),
        })
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }

    /// Get token lifetime in seconds
    pub fn token_ttl_seconds(&self) -> i64 {
        self.jwt.token_ttl_seconds
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|value| parse_flag(&value))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_true() -> bool {
    true
}
