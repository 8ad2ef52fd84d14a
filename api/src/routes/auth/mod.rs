//! Token lifecycle endpoints
//!
//! - `POST /api/v1/auth/login` - exchange a username and password for a token
//! - `POST /api/v1/auth/refresh` - exchange a live token for a new one
//! - `POST /api/v1/auth/logout` - revoke a token

pub mod login;
pub mod logout;
pub mod refresh;

use std::sync::Arc;

use cb_core::repositories::UserRepository;
use cb_core::services::{AuthService, CredentialVerifier};

/// Application state shared by the lifecycle handlers
pub struct AppState<U, C>
where
    U: UserRepository,
    C: CredentialVerifier,
{
    pub auth_service: Arc<AuthService<U, C>>,
}

impl<U, C> AppState<U, C>
where
    U: UserRepository,
    C: CredentialVerifier,
{
    pub fn new(auth_service: Arc<AuthService<U, C>>) -> Self {
        Self { auth_service }
    }
}
