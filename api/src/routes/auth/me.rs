use actix_web::HttpResponse;

use crate::dto::auth::UserInfo;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Requires authentication via Bearer token in Authorization header.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(UserInfo {
        id: auth.user_id,
        email: auth.email,
    })
}
