//! Authentication route handlers
//!
//! This module contains the session endpoints:
//! - Registration and login, which start a session
//! - Token refresh with rotation of the refresh cookie
//! - Logout
//! - The profile of the authenticated user

pub mod cookie;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;

pub use login::login;
pub use logout::logout;
pub use me::me;
pub use refresh::refresh;
pub use register::register;

use actix_web::HttpResponse;
use lb_core::domain::entities::{token::TokenPair, user::User};

use crate::dto::auth::{AuthResponse, UserInfo};

/// Response of a freshly started session: access token in the body,
/// refresh token in the cookie
pub(crate) fn session_response(user: &User, tokens: TokenPair, refresh_max_age: i64) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(cookie::refresh_cookie(tokens.refresh_token, refresh_max_age))
        .json(AuthResponse {
            access_token: tokens.access_token,
            user: UserInfo::from(user),
        })
}
