//! Request and response bodies for the token lifecycle endpoints

use serde::{Deserialize, Serialize};

/// Body of POST /api/v1/auth/login
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of POST /api/v1/auth/refresh and POST /api/v1/auth/logout
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}
