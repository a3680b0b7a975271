//! Price and category filters over rendered listing cards
//!
//! Filtering never refetches: it only flips the `hidden` flag of cards that
//! are already on the page. `static/app.js` does the same in the browser.

use std::str::FromStr;

use serde::Deserialize;

use crate::render::{CardView, category_key};

/// Thresholds offered by the price dropdown, besides [`ALL`].
pub const PRICE_THRESHOLDS: [u32; 3] = [10, 50, 100];

/// Sentinel value that disables a filter.
pub const ALL: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceFilter {
    #[default]
    All,
    Max(u32),
}

impl PriceFilter {
    pub fn admits(&self, price: f64) -> bool {
        match self {
            PriceFilter::All => true,
            PriceFilter::Max(max) => price <= f64::from(*max),
        }
    }

    pub fn value(&self) -> String {
        match self {
            PriceFilter::All => ALL.to_string(),
            PriceFilter::Max(max) => max.to_string(),
        }
    }
}

impl FromStr for PriceFilter {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            return Ok(PriceFilter::All);
        }
        s.parse().map(PriceFilter::Max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(category_key(value))
        }
    }

    pub fn admits(&self, categories: &[String]) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => categories.iter().any(|c| c == category),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            CategoryFilter::All => ALL,
            CategoryFilter::Only(category) => category,
        }
    }
}

/// `?price=&category=` as sent by the filter form when scripting is off.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub price: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    pub price: PriceFilter,
    pub category: CategoryFilter,
}

impl CardFilter {
    /// Unparseable values fall back to showing everything.
    pub fn from_query(query: &FilterQuery) -> Self {
        let price = match query.price.as_deref().map(str::parse::<PriceFilter>) {
            Some(Ok(price)) => price,
            Some(Err(err)) => {
                tracing::warn!(price = ?query.price, err = %err, "Ignoring invalid price filter");
                PriceFilter::All
            }
            None => PriceFilter::All,
        };

        Self {
            price,
            category: query
                .category
                .as_deref()
                .map(CategoryFilter::parse)
                .unwrap_or_default(),
        }
    }

    pub fn apply(&self, cards: &mut [CardView]) {
        for card in cards {
            card.hidden =
                !(self.price.admits(card.price) && self.category.admits(&card.categories));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Options of the price dropdown, `All` first.
pub fn price_options(selected: PriceFilter) -> Vec<FilterOption> {
    std::iter::once(PriceFilter::All)
        .chain(PRICE_THRESHOLDS.into_iter().map(PriceFilter::Max))
        .map(|option| FilterOption {
            value: option.value(),
            label: match option {
                PriceFilter::All => ALL.to_string(),
                PriceFilter::Max(max) => format!("${max}"),
            },
            selected: option == selected,
        })
        .collect()
}

/// Category buttons: every distinct category present on the page, sorted,
/// after the `All` button.
pub fn category_options(cards: &[CardView], selected: &CategoryFilter) -> Vec<FilterOption> {
    let mut categories: Vec<&str> = cards
        .iter()
        .flat_map(|card| card.categories.iter().map(String::as_str))
        .collect();
    categories.sort_unstable();
    categories.dedup();

    std::iter::once(ALL)
        .chain(categories)
        .map(|category| FilterOption {
            value: category.to_string(),
            label: category.replace('-', " "),
            selected: category == selected.value(),
        })
        .collect()
}
