use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::LoginRequest;
use crate::handlers::{handle_domain_error, validation_error_response};

use lb_core::repositories::{RefreshTokenRepository, UserRepository};
use lb_core::services::{PasswordHasher, SessionService};

use super::session_response;

/// Handler for POST /api/v1/auth/login
///
/// Same request and response shapes as registration. Unknown email and wrong
/// password both answer 401 `INVALID_CREDENTIALS`.
pub async fn login<U, T, H>(
    sessions: web::Data<SessionService<U, T, H>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: RefreshTokenRepository + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match sessions.login(&request.email, &request.password).await {
        Ok((user, tokens)) => {
            let max_age = sessions.codec().refresh_ttl().num_seconds();
            session_response(&user, tokens, max_age)
        }
        Err(error) => handle_domain_error(error),
    }
}
