//! CORS middleware configuration for cross-origin requests.
//!
//! The browser client sends the refresh token as a cookie, so credentials are
//! always supported. Development accepts any origin; production only the
//! origins listed in `server.cors_allowed_origins`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use lb_shared::Environment;

/// Creates a CORS middleware instance configured for the given environment.
pub fn create_cors(environment: Environment, allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .supports_credentials()
        .max_age(3600);

    if !environment.is_production() {
        tracing::info!(%environment, "Configuring permissive CORS");
        return cors.allow_any_origin();
    }

    allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            tracing::info!(origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}
