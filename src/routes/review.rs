use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use tracing::{error, info, warn};

use crate::form::ReviewForm;
use crate::gate::Credential;
use crate::routes::{AppState, with_notice};

/// POST /places/{id}/reviews
///
/// Always answers with a redirect back to the detail page, which refetches
/// the listing so the new review shows up and the form starts empty.
pub async fn action(
    Credential(token): Credential,
    State(app): State<AppState>,
    Path((id,)): Path<(String,)>,
    Form(input): Form<ReviewForm>,
) -> Redirect {
    let detail_path = format!("/places/{}", urlencoding::encode(&id));

    let Some(token) = token else {
        warn!(place = id, "Review submitted without session, redirecting to login");
        return Redirect::to("/login");
    };

    let payload = match input.into_payload(&id) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(place = id, err = %err, "Review rejected by form validation");
            return Redirect::to(&with_notice(&detail_path, &err.0));
        }
    };

    match app.api.submit_review(&token, &payload).await {
        Ok(()) => {
            info!(place = id, rating = payload.rating, "Review submitted");
            Redirect::to(&detail_path)
        }
        Err(err) => {
            error!(place = id, err = %err, "Failed to submit review");
            Redirect::to(&with_notice(
                &detail_path,
                &err.message_or("Failed to submit review"),
            ))
        }
    }
}
