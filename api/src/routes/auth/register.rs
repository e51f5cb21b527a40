use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::RegisterRequest;
use crate::handlers::{handle_domain_error, validation_error_response};

use lb_core::repositories::{RefreshTokenRepository, UserRepository};
use lb_core::services::{PasswordHasher, SessionService};

use super::session_response;

/// Handler for POST /api/v1/auth/register
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "password": "at least 6 chars" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "access_token": "eyJ...", "user": { "id": 1, "email": "alice@example.com" } }
/// ```
/// The refresh token is set as the `refresh_token` cookie.
///
/// ## Errors
/// - 400 Bad Request: Invalid email or password too short
/// - 409 Conflict: Email already registered
pub async fn register<U, T, H>(
    sessions: web::Data<SessionService<U, T, H>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match sessions.register(&request.email, &request.password).await {
        Ok((user, tokens)) => {
            let max_age = sessions.codec().refresh_ttl().num_seconds();
            session_response(&user, tokens, max_age)
        }
        Err(error) => handle_domain_error(error),
    }
}
