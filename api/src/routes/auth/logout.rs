use actix_web::{web, HttpResponse};

use cb_core::repositories::UserRepository;
use cb_core::services::CredentialVerifier;

use crate::dto::auth::{LogoutResponse, TokenRequest};
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented token along with every other token issued
/// against the same counter value.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: `INVALID_TOKEN`, or `TOKEN_EXPIRED` unless expired logouts are enabled
pub async fn logout<U, C>(
    state: web::Data<AppState<U, C>>,
    body: web::Json<TokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CredentialVerifier + 'static,
{
    state.auth_service.logout(&body.token).await?;

    Ok(HttpResponse::Ok().json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}
