//! Catalog filtering and sorting.

use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use super::{Coating, Color, Facade, Material};

/// Catalog filter, deserializable straight from a `/catalog` query string.
///
/// Empty form values (`?material=`) are treated as "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogQuery {
    /// Category slug.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub material: Option<Material>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub coating: Option<Coating>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub color: Option<Color>,
    /// Only facades that are in stock.
    #[serde(default, deserialize_with = "checkbox")]
    pub in_stock: bool,
    /// Minimum price per m², inclusive.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_price: Option<Decimal>,
    /// Maximum price per m², inclusive.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<Decimal>,
    /// Case-insensitive text search over name and description.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub q: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub sort: Option<SortOrder>,
}

impl CatalogQuery {
    /// Whether a facade passes every filter except the category.
    #[must_use]
    pub fn matches(&self, facade: &Facade) -> bool {
        if self.material.is_some_and(|m| facade.material != m) {
            return false;
        }
        if self.coating.is_some_and(|c| !facade.offers_coating(c)) {
            return false;
        }
        if self.color.is_some_and(|c| !facade.offers_color(c)) {
            return false;
        }
        if self.in_stock && !facade.in_stock {
            return false;
        }
        let price = facade.price_per_sqm.amount;
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }
        if let Some(text) = self.q.as_deref() {
            let needle = text.trim().to_lowercase();
            if !needle.is_empty()
                && !facade.name.to_lowercase().contains(&needle)
                && !facade.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    /// Whether any filter is set.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.category.is_some()
            || self.material.is_some()
            || self.coating.is_some()
            || self.color.is_some()
            || self.in_stock
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.q.is_some()
    }
}

/// Catalog sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Highest rating first, then most reviews.
    #[default]
    Popular,
    PriceAsc,
    PriceDesc,
    Name,
}

impl SortOrder {
    pub const ALL: [Self; 4] = [Self::Popular, Self::PriceAsc, Self::PriceDesc, Self::Name];

    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Name => "name",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Popular => "По популярности",
            Self::PriceAsc => "Сначала дешёвые",
            Self::PriceDesc => "Сначала дорогие",
            Self::Name => "По названию",
        }
    }

    /// Sort in place. The sort is stable, so ties keep catalog order.
    pub fn apply(&self, facades: &mut [&Facade]) {
        match self {
            Self::Popular => facades.sort_by(|a, b| {
                b.rating
                    .score
                    .cmp(&a.rating.score)
                    .then(b.rating.reviews.cmp(&a.rating.reviews))
            }),
            Self::PriceAsc => facades.sort_by_key(|f| f.price_per_sqm.amount),
            Self::PriceDesc => {
                facades.sort_by(|a, b| b.price_per_sqm.amount.cmp(&a.price_per_sqm.amount));
            }
            Self::Name => facades.sort_by(|a, b| a.name.cmp(&b.name)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.slug() == s)
            .ok_or_else(|| format!("invalid sort order: {s}"))
    }
}

/// Deserialize an optional value, mapping an empty or blank string to `None`.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// HTML checkboxes submit `on` when ticked and nothing otherwise.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(matches!(raw.as_deref(), Some("on" | "true" | "1")))
}
