//! In-memory implementation of UserRepository
//!
//! Backs the development profile and the test suites. All mutations take the
//! single write guard, which makes each of them atomic for this process.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::Principal;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// User directory held in process memory, keyed by username
#[derive(Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, Principal>>>,
}

impl InMemoryUserRepository {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored principals
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn next_version(current: u64) -> Result<u64, DomainError> {
    current.checked_add(1).ok_or_else(|| DomainError::Internal {
        message: "Revocation counter overflow".to_string(),
    })
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.contains_key(username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn create(&self, principal: Principal) -> Result<Principal, DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(&principal.username) {
            return Err(AuthError::UsernameTaken.into());
        }
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&principal.email))
        {
            return Err(AuthError::EmailTaken.into());
        }

        users.insert(principal.username.clone(), principal.clone());
        Ok(principal)
    }

    async fn increment_token_version(&self, username: &str) -> Result<u64, DomainError> {
        let mut users = self.users.write().await;
        let principal = users.get_mut(username).ok_or(AuthError::UserNotFound)?;

        principal.token_version = next_version(principal.token_version)?;
        principal.updated_at = Utc::now();
        Ok(principal.token_version)
    }

    async fn compare_and_increment_token_version(
        &self,
        username: &str,
        expected: u64,
    ) -> Result<Option<u64>, DomainError> {
        let mut users = self.users.write().await;
        let principal = match users.get_mut(username) {
            Some(p) if p.token_version == expected => p,
            _ => return Ok(None),
        };

        principal.token_version = next_version(principal.token_version)?;
        principal.updated_at = Utc::now();
        Ok(Some(principal.token_version))
    }

    async fn update_password(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<u64, DomainError> {
        let mut users = self.users.write().await;
        let principal = users.get_mut(username).ok_or(AuthError::UserNotFound)?;

        principal.token_version = next_version(principal.token_version)?;
        principal.password_hash = password_hash.to_string();
        principal.updated_at = Utc::now();
        Ok(principal.token_version)
    }
}
