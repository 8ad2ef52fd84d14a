use actix_web::{web, HttpResponse};

use cb_core::repositories::UserRepository;
use cb_core::services::CredentialVerifier;

use crate::dto::auth::LoginRequest;
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// # Request Body
///
/// ```json
/// {
///     "username": "admin",
///     "password": "password"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_at": "2024-01-01T01:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: `AUTHENTICATION_FAILED` for an unknown user or a wrong password
/// - 500 Internal Server Error: directory or hashing failure
pub async fn login<U, C>(
    state: web::Data<AppState<U, C>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CredentialVerifier + 'static,
{
    let request = body.into_inner();
    let issued = state
        .auth_service
        .login(&request.username, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(issued))
}
