use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::RefreshResponse;
use crate::dto::error::{error_codes, ErrorResponse};
use crate::handlers::handle_domain_error;

use lb_core::errors::DomainError;
use lb_core::repositories::{RefreshTokenRepository, UserRepository};
use lb_core::services::{PasswordHasher, SessionService};

use super::cookie::{refresh_cookie, refresh_token_from, removal_cookie};

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges the refresh token from the `refresh_token` cookie for a new
/// access token and rotates the cookie.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "access_token": "eyJ..." }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Cookie missing, token invalid, expired or already rotated;
///   the cookie is cleared
/// - 500 Internal Server Error: Store failure
pub async fn refresh<U, T, H>(
    req: HttpRequest,
    sessions: web::Data<SessionService<U, T, H>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    let Some(refresh_token) = refresh_token_from(&req) else {
        return HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::INVALID_TOKEN,
            "Refresh token not found",
        ));
    };

    match sessions.refresh(&refresh_token).await {
        Ok(tokens) => {
            let max_age = sessions.codec().refresh_ttl().num_seconds();
            HttpResponse::Ok()
                .cookie(refresh_cookie(tokens.refresh_token, max_age))
                .json(RefreshResponse {
                    access_token: tokens.access_token,
                })
        }
        Err(error) => {
            let rejected = matches!(error, DomainError::Token(_));
            let mut response = handle_domain_error(error);
            if rejected {
                if let Err(e) = response.add_cookie(&removal_cookie()) {
                    tracing::warn!(error = %e, "Failed to clear refresh cookie");
                }
            }
            response
        }
    }
}
