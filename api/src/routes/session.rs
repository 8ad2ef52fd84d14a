use actix_web::HttpResponse;

use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/session
///
/// Echoes the authenticated caller. Roles are the ones embedded in the
/// presented token.
///
/// ## Errors
/// - 401 Unauthorized: `AUTHENTICATION_REQUIRED`, `INVALID_TOKEN` or `TOKEN_EXPIRED`
pub async fn current_session(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(auth)
}
