//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the bearer token from the Authorization header,
//! resolves it through the [`AccessTokenIdentifier`] registered as app data,
//! and injects an [`AuthContext`] into the request extensions. Handlers take
//! `AuthContext` as an argument to get the authenticated user.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use lb_core::{
    domain::entities::user::User,
    errors::{DomainError, TokenError},
    services::AccessTokenIdentifier,
};
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::handlers::handle_domain_error;

/// User authentication context injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Authenticated user id
    pub user_id: i64,
    /// Email of the authenticated user
    pub email: String,
}

impl From<User> for AuthContext {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
        }
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    /// Creates a new JWT authentication middleware
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let identifier = req
            .app_data::<web::Data<dyn AccessTokenIdentifier>>()
            .cloned();

        Box::pin(async move {
            let Some(identifier) = identifier else {
                tracing::error!("JwtAuth used without an AccessTokenIdentifier in app data");
                return Ok(reject(req, DomainError::internal("authentication not configured")));
            };

            let Some(token) = extract_bearer_token(&req) else {
                return Ok(reject(req, TokenError::Invalid.into()));
            };

            let user = match identifier.identify(&token).await {
                Ok(user) => user,
                // Only expiry is reported distinctly; every other cause reads as invalid
                Err(e @ (DomainError::Token(TokenError::Expired) | DomainError::Internal { .. })) => {
                    return Ok(reject(req, e));
                }
                Err(_) => return Ok(reject(req, TokenError::Invalid.into())),
            };

            req.extensions_mut().insert(AuthContext::from(user));

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Answer the request with the error body instead of calling the wrapped service
fn reject<B>(req: ServiceRequest, error: DomainError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(handle_domain_error(error))
        .map_into_right_body()
}

fn unauthorized(error: DomainError) -> Error {
    let reason = error.to_string();
    InternalError::from_response(reason, handle_domain_error(error)).into()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| unauthorized(TokenError::Invalid.into()));

        ready(result)
    }
}
