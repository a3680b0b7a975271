use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::gate::{NavState, Viewer};
use crate::template::{NOT_FOUND, SERVER_ERROR_MESSAGE};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Template error: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Not found")]
    NotFound,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPageTemplate {
    status_code: u16,
    error_title: String,
    error_message: String,
    nav: NavState,
    notice: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_display = self.to_string();
        let (status_code, error_title, error_message) = match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "Page Not Found".to_string(),
                NOT_FOUND.to_string(),
            ),
            AppError::TemplateError(e) => {
                tracing::error!(err = ?e, "Template error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    SERVER_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let template = ErrorPageTemplate {
            status_code: status_code.as_u16(),
            error_title,
            error_message,
            nav: Viewer::anonymous().nav(),
            notice: None,
        };

        match template.render() {
            Ok(html) => (status_code, Html(html)).into_response(),
            Err(e) => {
                tracing::error!(err = ?e, "Failed to render error page");
                (status_code, format!("An error occurred: {}", error_display)).into_response()
            }
        }
    }
}
