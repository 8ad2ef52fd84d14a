//! bcrypt-backed credential verifier

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use tracing::warn;

use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;

use super::traits::CredentialVerifier;

// Compared against when the username is unknown, so that the miss costs one
// bcrypt verification like a hit does.
const DUMMY_PASSWORD: &str = "collabrium-dummy-password";

/// Verifies passwords against the bcrypt hashes held by the user directory
pub struct BcryptCredentialVerifier<U: UserRepository> {
    users: Arc<U>,
    cost: u32,
    dummy_hash: Arc<OnceCell<String>>,
}

impl<U: UserRepository> BcryptCredentialVerifier<U> {
    /// Creates a verifier using bcrypt's default cost
    pub fn new(users: Arc<U>) -> Self {
        Self::with_cost(users, bcrypt::DEFAULT_COST)
    }

    /// Creates a verifier with an explicit cost factor (4..=31)
    pub fn with_cost(users: Arc<U>, cost: u32) -> Self {
        Self {
            users,
            cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

fn join_error(err: tokio::task::JoinError) -> DomainError {
    DomainError::Internal {
        message: format!("Password hashing task failed: {}", err),
    }
}

#[async_trait]
impl<U: UserRepository> CredentialVerifier for BcryptCredentialVerifier<U> {
    async fn verify(&self, username: &str, password: &str) -> DomainResult<bool> {
        let stored_hash = self
            .users
            .find_by_username(username)
            .await?
            .map(|principal| principal.password_hash);

        let password = password.to_string();
        let dummy_hash = self.dummy_hash.clone();
        let cost = self.cost;

        let outcome = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => bcrypt::verify(&password, &hash),
            None => {
                let dummy = dummy_hash.get_or_try_init(|| bcrypt::hash(DUMMY_PASSWORD, cost))?;
                bcrypt::verify(&password, dummy).map(|_| false)
            }
        })
        .await
        .map_err(join_error)?;

        match outcome {
            Ok(matched) => Ok(matched),
            Err(e) => {
                // An unreadable stored hash fails like a wrong password
                warn!(username = %username, error = %e, "Stored password hash could not be verified");
                Ok(false)
            }
        }
    }

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(join_error)?
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            })
    }
}
