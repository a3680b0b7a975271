use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::error;

use crate::api::ApiError;
use crate::error::AppError;
use crate::gate::{NavState, Viewer};
use crate::render::{self, DetailView};
use crate::routes::{AppState, NoticeQuery};
use crate::template::{RATINGS, render_with_status};

#[derive(Template)]
#[template(path = "place.html")]
pub struct PlaceTemplate {
    pub nav: NavState,
    pub notice: Option<String>,
    pub banner: Option<String>,
    pub detail: Option<String>,
    pub place_id: String,
    pub ratings: [u8; 5],
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceQuery {
    pub id: Option<String>,
    pub notice: Option<String>,
}

/// GET /places/{id}
pub async fn page(
    viewer: Viewer,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, AppError> {
    detail_page(&viewer, &app, &id, query.notice).await
}

/// GET /place?id= - Legacy detail URL, the id may be missing
pub async fn by_query(
    viewer: Viewer,
    State(app): State<AppState>,
    Query(query): Query<PlaceQuery>,
) -> Result<Response, AppError> {
    let id = query.id.unwrap_or_default();
    detail_page(&viewer, &app, &id, query.notice).await
}

async fn detail_page(
    viewer: &Viewer,
    app: &AppState,
    id: &str,
    notice: Option<String>,
) -> Result<Response, AppError> {
    let (status, detail, error) = match app.api.place_detail(id, viewer.token()).await {
        Ok(listing) => (StatusCode::OK, Some(DetailView::from(&listing)), None),
        Err(ApiError::MissingId) => {
            error!("Place id is missing, not fetching details");
            (
                StatusCode::BAD_REQUEST,
                None,
                Some("No place selected".to_string()),
            )
        }
        Err(err) => {
            error!(place = id, err = %err, "Failed to fetch place details");
            let status = match err.status() {
                Some(status) if status == StatusCode::NOT_FOUND => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            };
            (
                status,
                None,
                Some(err.message_or("Unable to load place details")),
            )
        }
    };

    let template = PlaceTemplate {
        nav: viewer.nav(),
        notice,
        banner: error
            .as_deref()
            .map(render::render_error_banner)
            .transpose()?,
        place_id: detail.as_ref().map(|d| d.id.clone()).unwrap_or_default(),
        detail: detail.as_ref().map(render::render_detail).transpose()?,
        ratings: RATINGS,
    };

    Ok(render_with_status(status, &template)?.into_response())
}
