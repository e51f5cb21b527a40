//! Application state and factory
//!
//! This module holds the collaborators shared by all workers and builds the
//! Actix-web application around them.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    web, App, Error, HttpRequest, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use crate::dto::error::{error_codes, ErrorResponse, ErrorResponseExt};
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{login, logout, me, refresh, register};
use crate::routes::files::{delete_file, download_file, list_files, upload_file};

use lb_core::repositories::{BlobMetaRepository, BlobStorage, RefreshTokenRepository, UserRepository};
use lb_core::services::{AccessTokenIdentifier, BlobService, PasswordHasher, SessionService};
use lb_shared::{Environment, ServerConfig};

/// Services shared by every worker of the HTTP server
pub struct AppState<U, T, H, S, M>
where
    U: UserRepository,
    T: RefreshTokenRepository,
    H: PasswordHasher,
    S: BlobStorage,
    M: BlobMetaRepository,
{
    pub sessions: Arc<SessionService<U, T, H>>,
    pub blobs: Arc<BlobService<S, M>>,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl<U, T, H, S, M> AppState<U, T, H, S, M>
where
    U: UserRepository,
    T: RefreshTokenRepository,
    H: PasswordHasher,
    S: BlobStorage,
    M: BlobMetaRepository,
{
    /// State with default server settings for the development environment
    pub fn new(sessions: Arc<SessionService<U, T, H>>, blobs: Arc<BlobService<S, M>>) -> Self {
        Self {
            sessions,
            blobs,
            server: ServerConfig::default(),
            environment: Environment::Development,
        }
    }

    /// Use the given server settings and environment
    pub fn with_server(mut self, server: ServerConfig, environment: Environment) -> Self {
        self.server = server;
        self.environment = environment;
        self
    }
}

impl<U, T, H, S, M> Clone for AppState<U, T, H, S, M>
where
    U: UserRepository,
    T: RefreshTokenRepository,
    H: PasswordHasher,
    S: BlobStorage,
    M: BlobMetaRepository,
{
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            blobs: Arc::clone(&self.blobs),
            server: self.server.clone(),
            environment: self.environment,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, T, H, S, M>(
    state: AppState<U, T, H, S, M>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
    S: BlobStorage + 'static,
    M: BlobMetaRepository + 'static,
{
    let identifier: Arc<dyn AccessTokenIdentifier> = state.sessions.clone();
    let cors = create_cors(state.environment, &state.server.cors_allowed_origins);

    App::new()
        // Services
        .app_data(web::Data::from(state.sessions.clone()))
        .app_data(web::Data::from(identifier))
        .app_data(web::Data::from(state.blobs.clone()))

        // Extractor limits and error bodies
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PayloadConfig::new(state.server.max_payload_size))

        // Middleware (the last one wrapped runs first)
        .wrap(cors)
        .wrap(TracingLogger::default())

        // Health check endpoint
        .route("/health", web::get().to(health_check))

        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<U, T, H>))
                        .route("/login", web::post().to(login::<U, T, H>))
                        .route("/refresh", web::post().to(refresh::<U, T, H>))
                        .route("/logout", web::post().to(logout::<U, T, H>))
                        .route("/me", web::get().to(me).wrap(JwtAuth::new())),
                )
                .service(
                    web::scope("/files")
                        .wrap(JwtAuth::new())
                        .route("", web::get().to(list_files::<S, M>))
                        .route("/{filename}", web::put().to(upload_file::<S, M>))
                        .route("/{filename}", web::get().to(download_file::<S, M>))
                        .route("/{filename}", web::delete().to(delete_file::<S, M>)),
                ),
        )

        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "lockbox-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new(error_codes::NOT_FOUND, "The requested resource was not found")
        .to_response(StatusCode::NOT_FOUND)
}

/// Malformed or oversized JSON bodies answer with the standard error body
fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> Error {
    let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, error.to_string())
        .to_response(StatusCode::BAD_REQUEST);
    InternalError::from_response(error, response).into()
}
