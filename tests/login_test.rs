//! Login and registration form handling against a stub backend

mod helpers;

use axum::http::{StatusCode, header};
use helpers::{TestApp, body_string, get, location, post_form};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_login_stores_token_cookie_and_redirects() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(json!({"email": "jane@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "abc"})))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .send(post_form(
            "/login",
            &[("email", " jane@example.com "), ("password", "secret")],
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/"));

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie should be set")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("token=abc"), "cookie: {cookie}");
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Strict"));
}

#[tokio::test]
async fn test_login_failure_shows_server_message() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "bad"})))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .send(post_form(
            "/login",
            &[("email", "jane@example.com"), ("password", "wrong")],
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(location(&response).is_none());
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body = body_string(response).await;
    assert!(body.contains("role=\"alert\""));
    assert!(body.contains("bad"));
}

#[tokio::test]
async fn test_login_failure_without_message_uses_default() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.backend)
        .await;

    let response = app
        .send(post_form(
            "/login",
            &[("email", "jane@example.com"), ("password", "wrong")],
            None,
        ))
        .await;

    let body = body_string(response).await;
    assert!(body.contains("Invalid credentials. Please try again."));
}

#[tokio::test]
async fn test_login_with_empty_field_makes_no_backend_call() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "abc"})))
        .expect(0)
        .mount(&app.backend)
        .await;

    let response = app
        .send(post_form(
            "/login",
            &[("email", "jane@example.com"), ("password", "   ")],
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(response).await;
    assert!(body.contains("Please fill in all fields"));
    assert!(body.contains("value=\"jane@example.com\""));
}

#[tokio::test]
async fn test_login_page_renders_form() {
    let app = TestApp::spawn().await;

    let response = app.send(get("/login", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("id=\"login-form\""));
    assert!(body.contains("data-busy-label=\"Logging in...\""));
    assert!(app.backend_paths().await.is_empty());
}

#[tokio::test]
async fn test_register_redirects_to_login() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/"))
        .and(body_json(json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "jane@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "u1"})))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .send(post_form(
            "/register",
            &[
                ("first_name", "Jane "),
                ("last_name", "Doe"),
                ("email", "jane@example.com"),
                ("password", "secret"),
            ],
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = location(&response).unwrap();
    assert!(location.starts_with("/login?notice="), "location: {location}");
}

#[tokio::test]
async fn test_register_failure_keeps_fields_but_not_password() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Email already registered"})),
        )
        .mount(&app.backend)
        .await;

    let response = app
        .send(post_form(
            "/register",
            &[
                ("first_name", "Jane"),
                ("last_name", "Doe"),
                ("email", "jane@example.com"),
                ("password", "hunter2"),
            ],
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("Email already registered"));
    assert!(body.contains("value=\"Jane\""));
    assert!(!body.contains("hunter2"));
}

#[tokio::test]
async fn test_login_with_unreachable_backend_shows_default_message() {
    let app = TestApp::unreachable().await;

    let response = app
        .send(post_form(
            "/login",
            &[("email", "jane@example.com"), ("password", "secret")],
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = body_string(response).await;
    assert!(body.contains("An error occurred. Please try again later."));
}
