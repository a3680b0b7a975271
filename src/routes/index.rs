use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::error::AppError;
use crate::filter::{CardFilter, FilterOption, FilterQuery, category_options, price_options};
use crate::gate::{NavState, Viewer};
use crate::render;
use crate::routes::AppState;
use crate::template::render;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub nav: NavState,
    pub notice: Option<String>,
    pub cards_html: String,
    pub price_options: Vec<FilterOption>,
    pub category_options: Vec<FilterOption>,
}

/// GET / - Listing cards with price and category filters
///
/// A failed listing fetch is only logged; the page renders without cards.
pub async fn page(
    viewer: Viewer,
    State(app): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, AppError> {
    let listings = match app.api.list_places(viewer.token()).await {
        Ok(listings) => listings,
        Err(err) => {
            error!(err = %err, authenticated = viewer.is_authenticated(), "Failed to fetch places");
            Vec::new()
        }
    };
    info!(count = listings.len(), "Rendering places");

    let filter = CardFilter::from_query(&query);
    let mut cards = render::cards(&listings);
    filter.apply(&mut cards);

    let template = IndexTemplate {
        nav: viewer.nav(),
        notice: None,
        price_options: price_options(filter.price),
        category_options: category_options(&cards, &filter.category),
        cards_html: render::render_cards(&cards)?,
    };

    Ok(render(&template)?.into_response())
}
