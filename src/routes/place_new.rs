use askama::Template;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::form::PlaceForm;
use crate::gate::{NavState, Viewer};
use crate::routes::AppState;
use crate::template::{render, render_with_status};

#[derive(Template)]
#[template(path = "place-new.html")]
pub struct PlaceNewTemplate {
    pub nav: NavState,
    pub notice: Option<String>,
    pub form: PlaceForm,
}

/// GET /places/new
pub async fn page(viewer: Viewer) -> Result<Response, AppError> {
    if !viewer.is_authenticated() {
        return Ok(Redirect::to("/login").into_response());
    }

    let template = PlaceNewTemplate {
        nav: viewer.nav(),
        notice: None,
        form: PlaceForm::default(),
    };

    Ok(render(&template)?.into_response())
}

/// POST /places - Create a listing, then go back to the index
pub async fn action(
    viewer: Viewer,
    State(app): State<AppState>,
    Form(input): Form<PlaceForm>,
) -> Result<Response, AppError> {
    let Some(token) = viewer.token() else {
        warn!("Place submitted without session, redirecting to login");
        return Ok(Redirect::to("/login").into_response());
    };

    let payload = match input.clone().into_payload() {
        Ok(payload) => payload,
        Err(err) => {
            warn!(err = %err, "Place rejected by form validation");
            return failed(&viewer, StatusCode::UNPROCESSABLE_ENTITY, input, err.0);
        }
    };

    match app.api.submit_place(token, &payload).await {
        Ok(()) => {
            info!(title = %payload.title, "Place created");
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => {
            error!(title = %payload.title, err = %err, "Failed to create place");
            let status = err.status().unwrap_or(StatusCode::BAD_GATEWAY);
            failed(
                &viewer,
                status,
                input,
                err.message_or("Failed to create place"),
            )
        }
    }
}

fn failed(
    viewer: &Viewer,
    status: StatusCode,
    form: PlaceForm,
    notice: String,
) -> Result<Response, AppError> {
    let template = PlaceNewTemplate {
        nav: viewer.nav(),
        notice: Some(notice),
        form,
    };

    Ok(render_with_status(status, &template)?.into_response())
}
