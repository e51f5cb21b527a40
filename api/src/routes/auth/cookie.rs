//! The `refresh_token` cookie

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;

/// Name of the cookie carrying the refresh token
pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

/// The cookie is only sent to the auth endpoints
pub const REFRESH_COOKIE_PATH: &str = "/api/v1/auth";

/// Build the refresh cookie
///
/// # Arguments
///
/// * `token` - Encoded refresh token
/// * `max_age_seconds` - Cookie lifetime, equal to the refresh token lifetime
pub fn refresh_cookie(token: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE_NAME, token)
        .path(REFRESH_COOKIE_PATH)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

/// Cookie that makes the browser drop the refresh token
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = refresh_cookie(String::new(), 0);
    cookie.make_removal();
    cookie
}

/// Refresh token sent by the client, if any
pub fn refresh_token_from(req: &HttpRequest) -> Option<String> {
    req.cookie(REFRESH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_refresh_cookie_attributes() {
        let cookie = refresh_cookie("token-value".to_string(), 3600);

        assert_eq!(cookie.name(), "refresh_token");
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.path(), Some("/api/v1/auth"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = removal_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.path(), Some("/api/v1/auth"));
    }

    #[test]
    fn test_refresh_token_from_request() {
        let req = TestRequest::default()
            .cookie(Cookie::new(REFRESH_COOKIE_NAME, "abc"))
            .to_http_request();
        assert_eq!(refresh_token_from(&req), Some("abc".to_string()));

        let empty = TestRequest::default()
            .cookie(Cookie::new(REFRESH_COOKIE_NAME, ""))
            .to_http_request();
        assert_eq!(refresh_token_from(&empty), None);

        assert_eq!(refresh_token_from(&TestRequest::default().to_http_request()), None);
    }
}
