//! Display data shared by several templates.
//!
//! Templates receive preformatted strings; all number and price formatting
//! happens here.

use std::collections::HashSet;

use facade_shop_core::{Catalog, Color, Facade, FacadeId};

/// A facade tile in a grid.
#[derive(Debug, Clone)]
pub struct FacadeCard {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub category: String,
    pub material: &'static str,
    /// e.g. `5 000 ₽/м²`
    pub price: String,
    pub rating: String,
    pub reviews: u32,
    pub in_stock: bool,
    pub is_favorite: bool,
}

impl FacadeCard {
    #[must_use]
    pub fn new(catalog: &Catalog, facade: &Facade, favorites: &HashSet<FacadeId>) -> Self {
        Self {
            id: facade.id.as_i32(),
            name: facade.name.clone(),
            image: facade.image.clone(),
            category: catalog
                .category(facade.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            material: facade.material.label(),
            price: per_sqm(facade),
            rating: facade.rating.score.to_string(),
            reviews: facade.rating.reviews,
            in_stock: facade.in_stock,
            is_favorite: favorites.contains(&facade.id),
        }
    }

    /// Cards for a list of facades.
    #[must_use]
    pub fn list<'a>(
        catalog: &Catalog,
        facades: impl IntoIterator<Item = &'a Facade>,
        favorites: &HashSet<FacadeId>,
    ) -> Vec<Self> {
        facades
            .into_iter()
            .map(|facade| Self::new(catalog, facade, favorites))
            .collect()
    }
}

/// Price per square metre, e.g. `5 000 ₽/м²`.
#[must_use]
pub fn per_sqm(facade: &Facade) -> String {
    format!("{}/м²", facade.price_per_sqm.display())
}

/// One `<option>` of a select or one radio button.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl OptionView {
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// A color swatch.
#[derive(Debug, Clone)]
pub struct SwatchView {
    pub value: &'static str,
    pub label: &'static str,
    pub hex: &'static str,
    pub selected: bool,
}

impl SwatchView {
    #[must_use]
    pub const fn new(color: Color, selected: bool) -> Self {
        Self {
            value: color.slug(),
            label: color.label(),
            hex: color.hex(),
            selected,
        }
    }
}

/// Only `/`-relative paths are followed after a form post. Browsers read `\`
/// as `/`, so any backslash is refused.
#[must_use]
pub fn safe_return_path(path: Option<&str>, fallback: &str) -> String {
    match path {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_card() {
        let catalog = Catalog::seed();
        let facade = catalog.facade(FacadeId::new(1)).unwrap();
        let favorites = HashSet::from([FacadeId::new(1)]);
        let card = FacadeCard::new(&catalog, facade, &favorites);
        assert_eq!(card.price, "5 000 ₽/м²");
        assert_eq!(card.category, "Кухни");
        assert!(card.is_favorite);
    }

    #[test]
    fn test_safe_return_path() {
        assert_eq!(safe_return_path(Some("/catalog?q=1"), "/"), "/catalog?q=1");
        assert_eq!(safe_return_path(Some("//evil.example"), "/"), "/");
        assert_eq!(safe_return_path(Some("https://evil.example"), "/"), "/");
        assert_eq!(safe_return_path(Some("/\\evil.example"), "/"), "/");
        assert_eq!(safe_return_path(Some("/catalog\\x"), "/"), "/");
        assert_eq!(safe_return_path(None, "/favorites"), "/favorites");
    }
}
