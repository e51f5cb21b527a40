use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::LogoutResponse;

use lb_core::repositories::{RefreshTokenRepository, UserRepository};
use lb_core::services::{PasswordHasher, SessionService};

use super::cookie::{refresh_token_from, removal_cookie};

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the refresh token from the cookie when one is present and always
/// clears the cookie. A store failure is logged, not reported; the client is
/// logged out either way.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "Logged out successfully" }
/// ```
pub async fn logout<U, T, H>(
    req: HttpRequest,
    sessions: web::Data<SessionService<U, T, H>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    if let Some(refresh_token) = refresh_token_from(&req) {
        if let Err(e) = sessions.logout(&refresh_token).await {
            tracing::warn!(error = %e, "Failed to revoke refresh token on logout");
        }
    }

    HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(LogoutResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        })
}
