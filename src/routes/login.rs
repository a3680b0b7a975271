use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::{error, info, warn};

use crate::api::ApiError;
use crate::error::AppError;
use crate::form::LoginForm;
use crate::gate::{NavState, Viewer};
use crate::routes::{AppState, NoticeQuery};
use crate::session::credential_cookie;
use crate::template::{render, render_with_status};

const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";
const LOGIN_FAILED: &str = "An error occurred. Please try again later.";

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub nav: NavState,
    pub notice: Option<String>,
    pub email: String,
}

/// GET /login
pub async fn page(viewer: Viewer, Query(query): Query<NoticeQuery>) -> Result<Response, AppError> {
    let template = LoginTemplate {
        nav: viewer.nav(),
        notice: query.notice,
        email: String::new(),
    };

    Ok(render(&template)?.into_response())
}

/// POST /login - Exchange credentials for a token stored in the session cookie
pub async fn action(
    State(app): State<AppState>,
    jar: CookieJar,
    Form(input): Form<LoginForm>,
) -> Result<Response, AppError> {
    let form = match input.clone().checked() {
        Ok(form) => form,
        Err(err) => {
            warn!(err = %err, "Login rejected by form validation");
            return failed(StatusCode::UNPROCESSABLE_ENTITY, input.email.trim(), err.0);
        }
    };

    info!(email = %form.email, "Processing login");

    match app.api.login(&form.email, &form.password).await {
        Ok(token) => {
            let jar = jar.add(credential_cookie(token, app.config.session.secure_cookie));
            info!(email = %form.email, "User logged in successfully");
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(err @ ApiError::Status { .. }) => {
            warn!(email = %form.email, err = %err, "Login refused by backend");
            failed(
                StatusCode::UNAUTHORIZED,
                &form.email,
                err.message_or(INVALID_CREDENTIALS),
            )
        }
        Err(err) => {
            error!(email = %form.email, err = %err, "Login request failed");
            failed(StatusCode::BAD_GATEWAY, &form.email, LOGIN_FAILED.to_string())
        }
    }
}

fn failed(status: StatusCode, email: &str, notice: String) -> Result<Response, AppError> {
    let template = LoginTemplate {
        nav: Viewer::anonymous().nav(),
        notice: Some(notice),
        email: email.to_string(),
    };

    Ok(render_with_status(status, &template)?.into_response())
}
