//! Payload to HTML renderers
//!
//! View models are built from backend payloads without failing: anything
//! missing degrades to empty or default text. The askama templates under
//! `templates/partials/` turn them into markup.

use askama::Template;

use crate::api::{Listing, Review};

pub const MAX_RATING: i64 = 5;

/// One listing card. The `data-price` and `data-category` attributes drive
/// the client-side filters.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub price_attr: String,
    pub location: String,
    pub categories: Vec<String>,
    pub category_attr: String,
    pub photo: Option<String>,
    pub hidden: bool,
}

impl From<&Listing> for CardView {
    fn from(listing: &Listing) -> Self {
        let categories: Vec<String> = listing
            .amenities
            .iter()
            .map(|amenity| category_key(&amenity.name))
            .filter(|key| !key.is_empty())
            .collect();

        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            price: listing.price,
            price_attr: listing.price.to_string(),
            location: location_label(listing),
            category_attr: categories.join(" "),
            categories,
            photo: listing.photos.first().cloned(),
            hidden: false,
        }
    }
}

/// Amenity names become single lowercase tokens so they fit a
/// space-separated attribute.
pub fn category_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

fn location_label(listing: &Listing) -> String {
    let location = listing.location.as_deref().map(str::trim).unwrap_or_default();
    if !location.is_empty() {
        return location.to_string();
    }

    match (listing.latitude, listing.longitude) {
        (Some(lat), Some(long)) => format!("({lat}, {long})"),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub filled: usize,
    pub empty: usize,
}

impl StarRating {
    pub fn new(rating: i64) -> Self {
        let filled = rating.clamp(0, MAX_RATING) as usize;
        Self {
            filled,
            empty: MAX_RATING as usize - filled,
        }
    }

    pub fn glyphs(&self) -> String {
        format!("{}{}", "★".repeat(self.filled), "☆".repeat(self.empty))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewView {
    pub author: String,
    pub text: String,
    pub rating: i64,
    pub stars: StarRating,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        let author = review
            .author
            .as_ref()
            .and_then(|author| author.first_name.clone())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Anonymous".to_string());

        Self {
            author,
            text: review.text.clone(),
            rating: review.rating.clamp(0, MAX_RATING),
            stars: StarRating::new(review.rating),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: String,
    pub title: String,
    pub price_label: String,
    pub owner: String,
    pub description: String,
    pub location: String,
    pub amenities: Vec<String>,
    pub reviews: Vec<ReviewView>,
    pub photos: Vec<String>,
}

impl From<&Listing> for DetailView {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            price_label: listing.price.to_string(),
            owner: listing
                .owner
                .as_ref()
                .and_then(|owner| owner.first_name.clone())
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            description: listing.description.clone().unwrap_or_default(),
            location: location_label(listing),
            amenities: listing
                .amenities
                .iter()
                .map(|amenity| amenity.name.clone())
                .collect(),
            reviews: listing.reviews.iter().map(ReviewView::from).collect(),
            photos: listing.photos.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "partials/place-cards.html")]
struct PlaceCardsTemplate<'a> {
    cards: &'a [CardView],
}

#[derive(Template)]
#[template(path = "partials/place-detail.html")]
struct PlaceDetailTemplate<'a> {
    detail: &'a DetailView,
}

#[derive(Template)]
#[template(path = "partials/error-banner.html")]
struct ErrorBannerTemplate<'a> {
    message: &'a str,
}

pub fn cards(listings: &[Listing]) -> Vec<CardView> {
    listings.iter().map(CardView::from).collect()
}

pub fn render_cards(cards: &[CardView]) -> askama::Result<String> {
    PlaceCardsTemplate { cards }.render()
}

pub fn render_detail(detail: &DetailView) -> askama::Result<String> {
    PlaceDetailTemplate { detail }.render()
}

pub fn render_error_banner(message: &str) -> askama::Result<String> {
    ErrorBannerTemplate { message }.render()
}
