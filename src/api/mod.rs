//! Typed client for the HBnB REST backend
//!
//! Every method issues exactly one request. Nothing is retried or cached;
//! callers decide how a failure is surfaced.

mod models;

pub use models::{
    Amenity, Listing, Owner, PlacePayload, Profile, RegisterPayload, Review, ReviewPayload,
};

use models::{ErrorBody, LoginRequest, LoginResponse};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

const API_PREFIX: &str = "/api/v1";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Backend returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Failed to decode backend response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Listing id is missing")]
    MissingId,
}

impl ApiError {
    /// Server-provided message when there is one, `default` otherwise.
    pub fn message_or(&self, default: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            _ => default.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    /// `POST /auth/login`, returns the access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginRequest { email, password });

        let body: LoginResponse = decode(send(request).await?).await?;
        Ok(body.access_token)
    }

    /// `POST /users/`
    pub async fn register(&self, payload: &RegisterPayload) -> Result<(), ApiError> {
        let request = self.http.post(self.url("/users/")).json(payload);
        send(request).await?;
        Ok(())
    }

    /// `GET /places/`. The backend answers 404 when there is nothing to list.
    pub async fn list_places(&self, token: Option<&str>) -> Result<Vec<Listing>, ApiError> {
        let request = authorize(self.http.get(self.url("/places/")), token);
        empty_on_not_found(send(request).await).await
    }

    /// `GET /places/{id}`. An empty id fails before any request is made.
    pub async fn place_detail(&self, id: &str, token: Option<&str>) -> Result<Listing, ApiError> {
        let segment = path_segment(id).ok_or(ApiError::MissingId)?;

        let request = authorize(
            self.http.get(self.url(&format!("/places/{segment}"))),
            token,
        );
        decode(send(request).await?).await
    }

    /// `GET /places/user/places`, the listings owned by the token holder.
    pub async fn my_places(&self, token: &str) -> Result<Vec<Listing>, ApiError> {
        let request = self
            .http
            .get(self.url("/places/user/places"))
            .bearer_auth(token);
        empty_on_not_found(send(request).await).await
    }

    /// `GET /users/profile`
    pub async fn profile(&self, token: &str) -> Result<Profile, ApiError> {
        let request = self.http.get(self.url("/users/profile")).bearer_auth(token);
        decode(send(request).await?).await
    }

    /// `POST /reviews/`
    pub async fn submit_review(&self, token: &str, payload: &ReviewPayload) -> Result<(), ApiError> {
        let request = self
            .http
            .post(self.url("/reviews/"))
            .bearer_auth(token)
            .json(payload);
        send(request).await?;
        Ok(())
    }

    /// `POST /places/`
    pub async fn submit_place(&self, token: &str, payload: &PlacePayload) -> Result<(), ApiError> {
        let request = self
            .http
            .post(self.url("/places/"))
            .bearer_auth(token)
            .json(payload);
        send(request).await?;
        Ok(())
    }
}

/// Percent-encodes an id so it stays a single path segment. Blank ids and
/// dot segments name no resource.
fn path_segment(id: &str) -> Option<String> {
    match id.trim() {
        "" | "." | ".." => None,
        id => Some(urlencoding::encode(id).into_owned()),
    }
}

fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Sends the request and turns a non-success status into [`ApiError::Status`].
async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request.send().await.map_err(ApiError::Network)?;

    let status = response.status();
    debug!(url = %response.url(), status = status.as_u16(), "Backend responded");

    if status.is_success() {
        return Ok(response);
    }

    // The error body is best effort, a garbled one still yields the status
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_message);

    Err(ApiError::Status { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(ApiError::Decode)
}

async fn empty_on_not_found(
    response: Result<Response, ApiError>,
) -> Result<Vec<Listing>, ApiError> {
    match response {
        Ok(response) => decode(response).await,
        Err(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}
