//! Application wiring with in-memory collaborators for route tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use lb_api::AppState;
use lb_core::repositories::{
    InMemoryBlobMetaRepository, InMemoryBlobStorage, InMemoryRefreshTokenRepository,
    InMemoryUserRepository,
};
use lb_core::services::{BcryptPasswordHasher, BlobService, SessionService, TokenCodec, TokenCodecConfig};

pub const ACCESS_SECRET: &str = "api-test-access-secret";
pub const REFRESH_SECRET: &str = "api-test-refresh-secret";

pub type TestState = AppState<
    InMemoryUserRepository,
    InMemoryRefreshTokenRepository,
    BcryptPasswordHasher,
    InMemoryBlobStorage,
    InMemoryBlobMetaRepository,
>;

pub fn codec_config() -> TokenCodecConfig {
    TokenCodecConfig::new(ACCESS_SECRET, REFRESH_SECRET)
}

pub fn test_state() -> TestState {
    test_state_with(codec_config())
}

pub fn test_state_with(config: TokenCodecConfig) -> TestState {
    let codec = TokenCodec::new(config).expect("valid codec config");
    let sessions = Arc::new(SessionService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryRefreshTokenRepository::new()),
        Arc::new(BcryptPasswordHasher::with_cost(4)),
        Arc::new(codec),
    ));
    let blobs = Arc::new(BlobService::new(
        Arc::new(InMemoryBlobStorage::new()),
        Arc::new(InMemoryBlobMetaRepository::new()),
    ));
    AppState::new(sessions, blobs)
}

/// The `refresh_token` cookie set by a response, if any
pub fn refresh_cookie_of<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "refresh_token")
        .map(|cookie| cookie.into_owned())
}

pub fn credentials(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "password": password })
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
