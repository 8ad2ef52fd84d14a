//! Bearer token authentication middleware.
//!
//! The middleware runs the request authenticator exactly once per request and
//! records the outcome in the request extensions:
//! - `AuthContext` when every check passed
//! - `AuthRejection` otherwise
//!
//! It never short-circuits the request. Routes that require a principal ask
//! for `AuthContext` and get a 401; public routes ignore it or use
//! `OptionalAuth`.

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use cb_core::{
    domain::value_objects::{AuthResult, RejectReason},
    repositories::UserRepository,
    services::RequestAuthenticator,
};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::handlers::ApiError;

/// Authenticated caller injected into requests
#[derive(Debug, Clone, Serialize)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub username: String,
    /// Roles embedded in the presented token
    pub roles: Vec<String>,
    pub token_version: u64,
}

impl AuthContext {
    /// Build the context from a successful authentication
    ///
    /// Returns `None` for a rejected result.
    pub fn from_result(result: AuthResult) -> Option<Self> {
        match result {
            AuthResult::Authenticated { principal, roles } => Some(Self {
                user_id: principal.id,
                username: principal.username,
                roles,
                token_version: principal.token_version,
            }),
            AuthResult::Rejected(_) => None,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Why the request carries no `AuthContext`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthRejection(pub RejectReason);

/// Object-safe view of the request authenticator
#[async_trait]
pub trait AuthenticatorWrapper: Send + Sync {
    async fn authenticate(&self, header: Option<&str>) -> AuthResult;
}

#[async_trait]
impl<U: UserRepository> AuthenticatorWrapper for RequestAuthenticator<U> {
    async fn authenticate(&self, header: Option<&str>) -> AuthResult {
        RequestAuthenticator::authenticate(self, header).await
    }
}

/// Bearer authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    authenticator: Arc<dyn AuthenticatorWrapper>,
}

impl JwtAuth {
    pub fn new(authenticator: Arc<dyn AuthenticatorWrapper>) -> Self {
        Self { authenticator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            authenticator: Arc::clone(&self.authenticator),
        }))
    }
}

/// Bearer authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    authenticator: Arc<dyn AuthenticatorWrapper>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = Arc::clone(&self.authenticator);

        Box::pin(async move {
            let header = authorization_header(&req);
            let result = authenticator.authenticate(header.as_deref()).await;

            match result {
                AuthResult::Rejected(reason) => {
                    // A missing header is an anonymous request, not an attack
                    if header.is_none() || reason == RejectReason::Malformed {
                        debug!(reason = %reason, path = %req.path(), "No usable bearer credential");
                    } else {
                        warn!(reason = %reason, path = %req.path(), "Bearer credential rejected");
                    }
                    req.extensions_mut().insert(AuthRejection(reason));
                }
                authenticated => {
                    if let Some(context) = AuthContext::from_result(authenticated) {
                        debug!(
                            username = %context.username,
                            path = %req.path(),
                            "Request authenticated"
                        );
                        req.extensions_mut().insert(context);
                    }
                }
            }

            service.call(req).await
        })
    }
}

/// Raw `Authorization` header value, if present and valid ASCII
fn authorization_header(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .map(str::to_string)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let extensions = req.extensions();
        let result = match extensions.get::<AuthContext>() {
            Some(context) => Ok(context.clone()),
            None => Err(ApiError::Unauthenticated(
                extensions.get::<AuthRejection>().map(|rejection| rejection.0),
            )),
        };

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}
