//! User repository trait: the user directory consumed by the auth services.
//!
//! Implementations own the revocation counter. Every operation that changes it
//! must be a single atomic read-modify-write in the backing store, so that two
//! replicas serving the same subject can never both move the counter from the
//! same starting value.

use async_trait::async_trait;

use crate::domain::entities::Principal;
use crate::errors::DomainError;

/// Repository trait for Principal persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use cb_core::repositories::UserRepository;
/// use cb_core::domain::entities::Principal;
/// use cb_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_username(
///         &self,
///         username: &str,
///     ) -> Result<Option<Principal>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn exists_by_username(&self, _: &str) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn exists_by_email(&self, _: &str) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn create(&self, p: Principal) -> Result<Principal, DomainError> { Ok(p) }
/// #   async fn increment_token_version(&self, _: &str) -> Result<u64, DomainError> { Ok(1) }
/// #   async fn compare_and_increment_token_version(&self, _: &str, _: u64) -> Result<Option<u64>, DomainError> { Ok(None) }
/// #   async fn update_password(&self, _: &str, _: &str) -> Result<u64, DomainError> { Ok(1) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a principal by username
    ///
    /// # Arguments
    /// * `username` - The unique subject name
    ///
    /// # Returns
    /// * `Ok(Some(Principal))` - Principal found
    /// * `Ok(None)` - No principal with that username
    /// * `Err(DomainError)` - Store failure
    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>, DomainError>;

    /// Check if a principal exists with the given username
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError>;

    /// Check if a principal exists with the given email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Create a new principal
    ///
    /// The uniqueness check and the insert are one atomic step.
    ///
    /// # Returns
    /// * `Ok(Principal)` - The stored principal
    /// * `Err(DomainError::Auth(AuthError::UsernameTaken))` - Username in use
    ///   (reported even when the email is also in use)
    /// * `Err(DomainError::Auth(AuthError::EmailTaken))` - Email in use
    async fn create(&self, principal: Principal) -> Result<Principal, DomainError>;

    /// Unconditionally increment the revocation counter
    ///
    /// # Returns
    /// * `Ok(new_version)` - Counter after the increment
    /// * `Err(DomainError::Auth(AuthError::UserNotFound))` - Unknown username
    async fn increment_token_version(&self, username: &str) -> Result<u64, DomainError>;

    /// Increment the revocation counter only if it currently equals `expected`
    ///
    /// # Arguments
    /// * `username` - The subject whose counter is updated
    /// * `expected` - Counter value the caller observed
    ///
    /// # Returns
    /// * `Ok(Some(new_version))` - The counter was `expected` and is now `expected + 1`
    /// * `Ok(None)` - The counter had moved on, or the principal no longer exists
    /// * `Err(DomainError)` - Store failure
    async fn compare_and_increment_token_version(
        &self,
        username: &str,
        expected: u64,
    ) -> Result<Option<u64>, DomainError>;

    /// Replace the password hash and increment the revocation counter in one step
    ///
    /// # Returns
    /// * `Ok(new_version)` - Counter after the increment
    /// * `Err(DomainError::Auth(AuthError::UserNotFound))` - Unknown username
    async fn update_password(&self, username: &str, password_hash: &str)
        -> Result<u64, DomainError>;
}
