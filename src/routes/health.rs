use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// GET /health - Liveness probe
///
/// Does not reach the backend: a frontend with the backend down still
/// serves error banners.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
