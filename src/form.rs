//! Form inputs and their validation
//!
//! Every form is trimmed before validation. A [`FormError`] blocks the
//! submission before any backend call is made.

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::api::{PlacePayload, RegisterPayload, ReviewPayload};

pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const SELECT_RATING: &str = "Please select a rating";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FormError(pub String);

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        // Sort so the reported message does not depend on map order
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));

        let message = fields
            .into_iter()
            .flat_map(|(_, errors)| errors.iter())
            .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| FILL_ALL_FIELDS.to_string());

        FormError(message)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub password: String,
}

impl LoginForm {
    pub fn checked(self) -> Result<Self, FormError> {
        let form = Self {
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
        };
        form.validate()?;
        Ok(form)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    pub password: String,
}

impl RegisterForm {
    pub fn into_payload(self) -> Result<RegisterPayload, FormError> {
        let form = Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
        };
        form.validate()?;

        Ok(RegisterPayload {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password: form.password,
        })
    }
}

/// Review form as posted. The rating arrives as text because an unselected
/// star widget sends nothing or an empty string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rating: String,
}

#[derive(Debug, Validate)]
struct CheckedReview {
    #[validate(length(min = 1, message = "Please write a review"))]
    text: String,
    #[validate(range(min = 1, max = 5, message = "Please select a rating"))]
    rating: u8,
}

impl ReviewForm {
    pub fn into_payload(self, place_id: &str) -> Result<ReviewPayload, FormError> {
        let review = CheckedReview {
            text: self.text.trim().to_string(),
            rating: self.rating.trim().parse().unwrap_or(0),
        };
        review.validate()?;

        Ok(ReviewPayload {
            text: review.text,
            rating: review.rating,
            place_id: place_id.to_string(),
        })
    }
}

/// New listing form. Numbers are kept as text so that a bad value can be
/// echoed back into the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    /// Comma separated amenity names
    #[serde(default)]
    pub amenities: String,
}

#[derive(Debug, Validate)]
struct CheckedPlace {
    #[validate(length(min = 1, message = "Please fill in all fields"))]
    title: String,
    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    price: f64,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    latitude: f64,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    longitude: f64,
}

fn parse_number(value: &str, field: &str) -> Result<f64, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError(FILL_ALL_FIELDS.to_string()));
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| FormError(format!("{field} must be a number")))
}

impl PlaceForm {
    pub fn into_payload(self) -> Result<PlacePayload, FormError> {
        let place = CheckedPlace {
            title: self.title.trim().to_string(),
            price: parse_number(&self.price, "Price")?,
            latitude: parse_number(&self.latitude, "Latitude")?,
            longitude: parse_number(&self.longitude, "Longitude")?,
        };
        place.validate()?;

        Ok(PlacePayload {
            title: place.title,
            description: self.description.trim().to_string(),
            price: place.price,
            latitude: place.latitude,
            longitude: place.longitude,
            amenities: self
                .amenities
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect(),
        })
    }
}
