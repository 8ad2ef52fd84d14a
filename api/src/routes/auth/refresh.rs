use actix_web::{web, HttpResponse};

use cb_core::repositories::UserRepository;
use cb_core::services::CredentialVerifier;

use crate::dto::auth::TokenRequest;
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Issues a new token for the presented one. With rotation enabled the
/// presented token stops working once this succeeds.
///
/// ## Errors
/// - 401 Unauthorized: `INVALID_TOKEN` or `TOKEN_EXPIRED`
pub async fn refresh<U, C>(
    state: web::Data<AppState<U, C>>,
    body: web::Json<TokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    C: CredentialVerifier + 'static,
{
    let issued = state.auth_service.refresh(&body.token).await?;
    Ok(HttpResponse::Ok().json(issued))
}
