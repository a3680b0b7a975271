use askama::Template;
use axum::{http::StatusCode, response::Html};

use crate::error::AppError;

pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong, please retry later";
pub const NOT_FOUND: &str = "The page you are looking for does not exist";

/// Values offered by the review rating widget.
pub const RATINGS: [u8; 5] = [1, 2, 3, 4, 5];

pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

pub fn render_with_status<T: Template>(
    status: StatusCode,
    template: &T,
) -> Result<(StatusCode, Html<String>), AppError> {
    Ok((status, render(template)?))
}
