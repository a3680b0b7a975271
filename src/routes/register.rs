use askama::Template;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::form::RegisterForm;
use crate::gate::{NavState, Viewer};
use crate::routes::{AppState, with_notice};
use crate::template::{render, render_with_status};

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub nav: NavState,
    pub notice: Option<String>,
    pub form: RegisterForm,
}

/// GET /register
pub async fn page(viewer: Viewer) -> Result<Response, AppError> {
    let template = RegisterTemplate {
        nav: viewer.nav(),
        notice: None,
        form: RegisterForm::default(),
    };

    Ok(render(&template)?.into_response())
}

/// POST /register - Create the account then send the user to the login page
pub async fn action(
    State(app): State<AppState>,
    Form(input): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let payload = match input.clone().into_payload() {
        Ok(payload) => payload,
        Err(err) => {
            warn!(err = %err, "Registration rejected by form validation");
            return failed(StatusCode::UNPROCESSABLE_ENTITY, input, err.0);
        }
    };

    match app.api.register(&payload).await {
        Ok(()) => {
            info!(email = %payload.email, "User registered");
            Ok(Redirect::to(&with_notice(
                "/login",
                "Registration successful, you can now log in",
            ))
            .into_response())
        }
        Err(err) => {
            error!(email = %payload.email, err = %err, "Registration failed");
            let status = err.status().unwrap_or(StatusCode::BAD_GATEWAY);
            failed(status, input, err.message_or("Registration failed"))
        }
    }
}

fn failed(status: StatusCode, input: RegisterForm, notice: String) -> Result<Response, AppError> {
    // Never echo the password back
    let form = RegisterForm {
        password: String::new(),
        ..input
    };
    let template = RegisterTemplate {
        nav: Viewer::anonymous().nav(),
        notice: Some(notice),
        form,
    };

    Ok(render_with_status(status, &template)?.into_response())
}
