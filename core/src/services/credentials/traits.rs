//! Credential verification trait

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Checks presented credentials against the stored ones
///
/// `verify` answers `false` both for an unknown username and for a wrong
/// password, and takes comparable time for either. Errors are reserved for
/// store or runtime failures.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verify a username/password pair
    async fn verify(&self, username: &str, password: &str) -> DomainResult<bool>;

    /// Hash a plaintext password for storage
    async fn hash_password(&self, password: &str) -> DomainResult<String>;
}
