//! Review submission from the place detail page

mod helpers;

use axum::http::StatusCode;
use helpers::{TestApp, location, post_form};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_review_is_posted_with_bearer_token() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/reviews/"))
        .and(header("authorization", "Bearer abc"))
        .and(body_json(json!({"text": "Great", "rating": 4, "place_id": "p1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "r1"})))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .send(post_form(
            "/places/p1/reviews",
            &[("text", "  Great "), ("rating", "4")],
            Some("abc"),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/places/p1"));
}

#[tokio::test]
async fn test_review_with_empty_text_makes_no_backend_call() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/reviews/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.backend)
        .await;

    let response = app
        .send(post_form(
            "/places/p1/reviews",
            &[("text", "   "), ("rating", "4")],
            Some("abc"),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = location(&response).unwrap();
    assert!(location.starts_with("/places/p1?notice="), "location: {location}");
}

#[tokio::test]
async fn test_review_without_rating_asks_for_one() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/reviews/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.backend)
        .await;

    let response = app
        .send(post_form(
            "/places/p1/reviews",
            &[("text", "Great"), ("rating", "0")],
            Some("abc"),
        ))
        .await;

    assert_eq!(
        location(&response).as_deref(),
        Some("/places/p1?notice=Please%20select%20a%20rating")
    );
}

#[tokio::test]
async fn test_review_without_session_redirects_to_login() {
    let app = TestApp::spawn().await;

    let response = app
        .send(post_form(
            "/places/p1/reviews",
            &[("text", "Great"), ("rating", "4")],
            None,
        ))
        .await;

    assert_eq!(location(&response).as_deref(), Some("/login"));
    assert!(app.backend_paths().await.is_empty());
}

#[tokio::test]
async fn test_review_rejected_by_backend_carries_message() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/reviews/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "You cannot review your own place"})),
        )
        .mount(&app.backend)
        .await;

    let response = app
        .send(post_form(
            "/places/p1/reviews",
            &[("text", "Great"), ("rating", "5")],
            Some("abc"),
        ))
        .await;

    let location = location(&response).unwrap();
    assert!(location.starts_with("/places/p1?notice="));
    assert!(location.contains("cannot%20review"), "location: {location}");
}
