use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::error;

use crate::error::AppError;
use crate::gate::{NavState, Viewer};
use crate::render;
use crate::routes::AppState;
use crate::template::render;

#[derive(Template)]
#[template(path = "my-places.html")]
pub struct MyPlacesTemplate {
    pub nav: NavState,
    pub notice: Option<String>,
    pub cards_html: String,
}

/// GET /my-places - Listings owned by the signed-in user
pub async fn page(viewer: Viewer, State(app): State<AppState>) -> Result<Response, AppError> {
    let Some(token) = viewer.token() else {
        return Ok(Redirect::to("/login").into_response());
    };

    let (cards, notice) = match app.api.my_places(token).await {
        Ok(listings) => (render::cards(&listings), None),
        Err(err) => {
            error!(err = %err, "Failed to fetch user places");
            (Vec::new(), Some(err.message_or("Unable to load your places")))
        }
    };

    let template = MyPlacesTemplate {
        nav: viewer.nav(),
        notice,
        cards_html: render::render_cards(&cards)?,
    };

    Ok(render(&template)?.into_response())
}
