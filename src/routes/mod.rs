use axum::{
    Router,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::AppError;

mod assets;
mod health;
mod index;
mod login;
mod my_places;
mod place;
mod place_new;
mod register;
mod review;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let api = ApiClient::new(config.backend.base_url.clone());
        Self { config, api }
    }
}

/// One-shot message shown above a page, carried through a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

/// `path?notice=<message>`
pub(crate) fn with_notice(path: &str, notice: &str) -> String {
    format!("{path}?notice={}", urlencoding::encode(notice))
}

pub async fn fallback() -> impl IntoResponse {
    AppError::NotFound
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(index::page))
        .route("/place", get(place::by_query))
        .route("/places", post(place_new::action))
        .route("/places/new", get(place_new::page))
        .route("/places/{id}", get(place::page))
        .route("/places/{id}/reviews", post(review::action))
        .route("/my-places", get(my_places::page))
        .route("/login", get(login::page).post(login::action))
        .route("/register", get(register::page).post(register::action))
        .route("/static/{*path}", get(assets::asset))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
