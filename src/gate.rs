//! Per-request authentication state
//!
//! [`Viewer`] runs before the handler body, so the profile lookup always
//! settles before a page starts loading its data.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, warn};

use crate::api::{ApiClient, Profile};
use crate::routes::AppState;
use crate::session::credential_from_headers;

/// What the navigation bar shows for the current viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    pub show_login: bool,
    pub show_add_review: bool,
    pub avatar: Option<char>,
}

#[derive(Debug, Clone, Default)]
pub struct Viewer {
    token: Option<String>,
    profile: Option<Profile>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Fetches the profile when a credential is present. A failed lookup is
    /// logged and otherwise ignored; the credential is still used for data.
    pub async fn resolve(api: &ApiClient, token: Option<String>) -> Self {
        let Some(token) = token else {
            debug!("No session credential, viewer is anonymous");
            return Self::anonymous();
        };

        let profile = match api.profile(&token).await {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!(err = %err, "Failed to fetch user profile");
                None
            }
        };

        Self {
            token: Some(token),
            profile,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn nav(&self) -> NavState {
        if !self.is_authenticated() {
            return NavState {
                show_login: true,
                show_add_review: false,
                avatar: None,
            };
        }

        NavState {
            show_login: false,
            show_add_review: true,
            avatar: self.profile.as_ref().and_then(Profile::initial),
        }
    }
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = credential_from_headers(&parts.headers);
        Ok(Viewer::resolve(&state.api, token).await)
    }
}

/// The bare session credential, for form submissions that do not render a
/// page and so skip the profile lookup.
#[derive(Debug, Clone)]
pub struct Credential(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for Credential {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Credential(credential_from_headers(&parts.headers)))
    }
}
