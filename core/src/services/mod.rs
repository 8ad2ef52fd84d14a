//! Business services containing domain logic and use cases.

pub mod auth;
pub mod authenticator;
pub mod credentials;
pub mod token;

// Re-export commonly used types
pub use auth::{seed_default_users, AuthService, AuthServiceConfig, DEFAULT_USER_PASSWORD};
pub use authenticator::{extract_bearer_token, RequestAuthenticator, BEARER_PREFIX};
pub use credentials::{BcryptCredentialVerifier, CredentialVerifier};
pub use token::{SigningKey, TokenCodec, TokenCodecConfig};
