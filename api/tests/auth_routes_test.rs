//! Integration tests for the session endpoints

mod common;

use actix_web::{cookie::time::Duration, http::StatusCode, test};
use lb_api::create_app;
use serde_json::Value;

use common::{bearer, credentials, refresh_cookie_of, test_state};

#[actix_web::test]
async fn test_register_returns_access_token_and_sets_cookie() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(credentials("alice@example.com", "secret1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = refresh_cookie_of(&resp).expect("refresh cookie set");
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.path(), Some("/api/v1/auth"));
    assert_eq!(cookie.max_age(), Some(Duration::hours(168)));

    let body: Value = test::read_body_json(resp).await;
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"]["id"].is_i64());
    assert!(body.get("refresh_token").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[actix_web::test]
async fn test_register_duplicate_email_conflicts() {
    let app = test::init_service(create_app(test_state())).await;

    for expected in [StatusCode::OK, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(credentials("dup@example.com", "secret1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);

        if expected == StatusCode::CONFLICT {
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "USER_ALREADY_EXISTS");
        }
    }
}

#[actix_web::test]
async fn test_register_validates_body() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(credentials("not-an-email", "123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"].get("email").is_some());
    assert!(body["details"].get("password").is_some());
}

#[actix_web::test]
async fn test_malformed_json_uses_error_body() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(credentials("bob@example.com", "secret1"))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let mut bodies = Vec::new();
    for (email, password) in [("bob@example.com", "wrong-pass"), ("nobody@example.com", "secret1")] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(credentials(email, password))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(refresh_cookie_of(&resp).is_none());

        let body: Value = test::read_body_json(resp).await;
        bodies.push((body["error"].clone(), body["message"].clone()));
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0].0, "INVALID_CREDENTIALS");
}

#[actix_web::test]
async fn test_login_then_me() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(credentials("carol@example.com", "secret1"))
        .to_request();
    let registered: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(credentials("carol@example.com", "secret1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(refresh_cookie_of(&resp).is_some());
    let logged_in: Value = test::read_body_json(resp).await;
    assert_eq!(logged_in["user"]["id"], registered["user"]["id"]);

    let token = logged_in["access_token"].as_str().unwrap();
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(token))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["email"], "carol@example.com");
    assert_eq!(me["id"], registered["user"]["id"]);
}

#[actix_web::test]
async fn test_refresh_rotates_cookie_and_rejects_reuse() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(credentials("dave@example.com", "secret1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let original = refresh_cookie_of(&resp).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(original.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rotated = refresh_cookie_of(&resp).expect("rotated cookie");
    assert_ne!(rotated.value(), original.value());

    let body: Value = test::read_body_json(resp).await;
    let access = body["access_token"].as_str().unwrap().to_string();

    // The new access token works
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&access))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // The old refresh token is spent and the cookie is cleared
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(original)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let cleared = refresh_cookie_of(&resp).expect("cookie cleared");
    assert_eq!(cleared.value(), "");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_TOKEN");

    // The rotated one still works
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(rotated)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_refresh_without_cookie_is_unauthorized() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post().uri("/api/v1/auth/refresh").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_TOKEN");
}

#[actix_web::test]
async fn test_access_token_is_not_a_refresh_token() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(credentials("erin@example.com", "secret1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let access = body["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(actix_web::cookie::Cookie::new("refresh_token", access))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_logout_revokes_and_clears_cookie() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(credentials("frank@example.com", "secret1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = refresh_cookie_of(&resp).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = refresh_cookie_of(&resp).expect("removal cookie");
    assert_eq!(cleared.value(), "");
    assert_eq!(cleared.max_age(), Some(Duration::ZERO));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(cookie)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_logout_without_cookie_succeeds() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post().uri("/api/v1/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(refresh_cookie_of(&resp).map(|c| c.value().to_string()), Some(String::new()));
}

#[actix_web::test]
async fn test_health_and_unknown_route() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");

    let req = test::TestRequest::get().uri("/api/v1/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
