//! Payloads exchanged with the REST backend

use serde::{Deserialize, Serialize};

/// A rentable property as returned by `/places/` and `/places/{id}`.
///
/// Every field except the price tolerates being absent so that summaries
/// and detail payloads share one type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub photos: Vec<String>,
}

/// The backend sends amenities either as `{"name": ...}` objects or as bare
/// names, depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "AmenityRepr")]
pub struct Amenity {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmenityRepr {
    Named { name: String },
    Bare(String),
}

impl From<AmenityRepr> for Amenity {
    fn from(repr: AmenityRepr) -> Self {
        match repr {
            AmenityRepr::Named { name } | AmenityRepr::Bare(name) => Amenity { name },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rating: i64,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, alias = "user")]
    pub author: Option<Owner>,
    #[serde(default)]
    pub place_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Profile {
    /// Uppercased first letter of the first name, used as the avatar.
    pub fn initial(&self) -> Option<char> {
        self.first_name
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub access_token: String,
}

/// Error body shape; the backend uses `message` or `error` interchangeably.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewPayload {
    pub text: String,
    pub rating: u8,
    pub place_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacePayload {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub amenities: Vec<String>,
}
