//! HTTP routes
//!
//! - `GET /health` - liveness, public
//! - `GET /api/v1/session` - the caller's authentication context, requires a bearer token
//! - `POST /api/v1/auth/{login,refresh,logout}` - token lifecycle, public

pub mod auth;
pub mod health;
pub mod session;

use actix_web::web;
use cb_core::repositories::UserRepository;
use cb_core::services::CredentialVerifier;

/// Register every route on an app or scope
///
/// The lifecycle handlers expect `web::Data<auth::AppState<U, C>>` on the app.
pub fn configure<U, C>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    C: CredentialVerifier + 'static,
{
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1")
                .route("/session", web::get().to(session::current_session))
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login::login::<U, C>))
                        .route("/refresh", web::post().to(auth::refresh::refresh::<U, C>))
                        .route("/logout", web::post().to(auth::logout::logout::<U, C>)),
                ),
        );
}
