//! Facade catalog: materials, coatings, the color palette and the in-memory
//! catalog with its queries and back-office mutations.

mod options;
mod query;
mod seed;

pub use options::{Coating, Color, Material};
pub use query::{CatalogQuery, SortOrder};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::favorites::FavoriteItem;
use crate::types::{CategoryId, FacadeId, Price};

/// Errors raised by catalog lookups and mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("facade {0} not found")]
    FacadeNotFound(FacadeId),
    #[error("category {0} not found")]
    CategoryNotFound(CategoryId),
    #[error("category {id} is used by {count} facade(s)")]
    CategoryInUse { id: CategoryId, count: usize },
    #[error("slug '{0}' is already taken")]
    DuplicateSlug(String),
    #[error("invalid facade: {0}")]
    InvalidFacade(String),
    #[error("invalid category: {0}")]
    InvalidCategory(String),
}

/// A product category (kitchen, wardrobe, bathroom...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub name: String,
    pub description: String,
}

/// Customer rating aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Rating {
    /// Average score 0.0-5.0, one decimal.
    pub score: Decimal,
    /// Number of reviews behind the score.
    pub reviews: u32,
}

/// A cabinet door/panel offered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facade {
    pub id: FacadeId,
    pub slug: String,
    pub name: String,
    pub category_id: CategoryId,
    pub material: Material,
    /// Coatings this facade can be ordered with. Never empty.
    pub coatings: Vec<Coating>,
    /// Colors this facade can be ordered in. Never empty.
    pub colors: Vec<Color>,
    pub thickness_mm: u16,
    pub price_per_sqm: Price,
    pub in_stock: bool,
    pub rating: Rating,
    pub featured: bool,
    pub image: String,
    pub description: String,
}

impl Facade {
    /// Whether the facade can be ordered with this coating.
    #[must_use]
    pub fn offers_coating(&self, coating: Coating) -> bool {
        self.coatings.contains(&coating)
    }

    /// Whether the facade can be ordered in this color.
    #[must_use]
    pub fn offers_color(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Snapshot of this facade for the favorites list.
    #[must_use]
    pub fn favorite_item(&self, category: Option<&Category>) -> FavoriteItem {
        FavoriteItem {
            id: self.id,
            name: self.name.clone(),
            price: self.price_per_sqm,
            image: self.image.clone(),
            category: category.map(|c| c.name.clone()),
        }
    }
}

/// Editable facade fields, as submitted from the back-office.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacadeDraft {
    pub name: String,
    pub slug: String,
    pub category_id: CategoryId,
    pub material: Material,
    pub coatings: Vec<Coating>,
    pub colors: Vec<Color>,
    pub thickness_mm: u16,
    pub price_per_sqm: Decimal,
    pub in_stock: bool,
    pub featured: bool,
    pub image: String,
    pub description: String,
}

impl FacadeDraft {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidFacade("name is required".to_string()));
        }
        validate_slug(&self.slug).map_err(CatalogError::InvalidFacade)?;
        if self.coatings.is_empty() {
            return Err(CatalogError::InvalidFacade(
                "at least one coating is required".to_string(),
            ));
        }
        if self.colors.is_empty() {
            return Err(CatalogError::InvalidFacade(
                "at least one color is required".to_string(),
            ));
        }
        if self.thickness_mm == 0 {
            return Err(CatalogError::InvalidFacade(
                "thickness must be positive".to_string(),
            ));
        }
        if self.price_per_sqm <= Decimal::ZERO {
            return Err(CatalogError::InvalidFacade(
                "price per m² must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Slugs are lowercase ASCII letters, digits and single hyphens.
pub(crate) fn validate_slug(slug: &str) -> Result<(), String> {
    let valid = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(format!("invalid slug '{slug}'"))
    }
}

/// The in-memory catalog of categories and facades.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<Category>,
    facades: Vec<Facade>,
}

impl Catalog {
    /// Build a catalog from explicit collections.
    #[must_use]
    pub const fn new(categories: Vec<Category>, facades: Vec<Facade>) -> Self {
        Self {
            categories,
            facades,
        }
    }

    /// The catalog shipped with the site.
    #[must_use]
    pub fn seed() -> Self {
        Self::new(seed::categories(), seed::facades())
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn facades(&self) -> &[Facade] {
        &self.facades
    }

    #[must_use]
    pub fn facade(&self, id: FacadeId) -> Option<&Facade> {
        self.facades.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn facade_by_slug(&self, slug: &str) -> Option<&Facade> {
        self.facades.iter().find(|f| f.slug == slug)
    }

    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// Facades flagged for the home page, in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &Facade> {
        self.facades.iter().filter(|f| f.featured)
    }

    /// Number of facades in a category.
    #[must_use]
    pub fn count_in_category(&self, id: CategoryId) -> usize {
        self.facades.iter().filter(|f| f.category_id == id).count()
    }

    /// Favorites snapshot for a facade, including its category name.
    #[must_use]
    pub fn favorite_item(&self, id: FacadeId) -> Option<FavoriteItem> {
        let facade = self.facade(id)?;
        Some(facade.favorite_item(self.category(facade.category_id)))
    }

    /// Filter and sort facades.
    #[must_use]
    pub fn search(&self, query: &CatalogQuery) -> Vec<&Facade> {
        let category = match query.category.as_deref() {
            Some(slug) => match self.category_by_slug(slug) {
                Some(category) => Some(category.id),
                // An unknown category matches nothing rather than everything
                None => return Vec::new(),
            },
            None => None,
        };

        let mut found: Vec<&Facade> = self
            .facades
            .iter()
            .filter(|f| category.is_none_or(|id| f.category_id == id))
            .filter(|f| query.matches(f))
            .collect();

        query.sort.unwrap_or_default().apply(&mut found);
        found
    }

    // =========================================================================
    // Back-office mutations
    // =========================================================================

    /// Add a facade, returning its new ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid, its slug is taken or its
    /// category does not exist.
    pub fn insert_facade(&mut self, draft: FacadeDraft) -> Result<FacadeId, CatalogError> {
        draft.validate()?;
        self.ensure_category(draft.category_id)?;
        if self.facade_by_slug(&draft.slug).is_some() {
            return Err(CatalogError::DuplicateSlug(draft.slug));
        }

        let id = self
            .facades
            .iter()
            .map(|f| f.id)
            .max()
            .map_or(FacadeId::new(1), |id| id.next());

        self.facades.push(Facade {
            id,
            slug: draft.slug,
            name: draft.name.trim().to_string(),
            category_id: draft.category_id,
            material: draft.material,
            coatings: draft.coatings,
            colors: draft.colors,
            thickness_mm: draft.thickness_mm,
            price_per_sqm: Price::rub(draft.price_per_sqm),
            in_stock: draft.in_stock,
            rating: Rating::default(),
            featured: draft.featured,
            image: draft.image,
            description: draft.description,
        });
        Ok(id)
    }

    /// Replace the editable fields of a facade. Rating is preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if the facade or category is missing, the draft is
    /// invalid or the slug belongs to another facade.
    pub fn update_facade(&mut self, id: FacadeId, draft: FacadeDraft) -> Result<(), CatalogError> {
        draft.validate()?;
        self.ensure_category(draft.category_id)?;
        if self
            .facade_by_slug(&draft.slug)
            .is_some_and(|other| other.id != id)
        {
            return Err(CatalogError::DuplicateSlug(draft.slug));
        }

        let facade = self
            .facades
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(CatalogError::FacadeNotFound(id))?;

        facade.slug = draft.slug;
        facade.name = draft.name.trim().to_string();
        facade.category_id = draft.category_id;
        facade.material = draft.material;
        facade.coatings = draft.coatings;
        facade.colors = draft.colors;
        facade.thickness_mm = draft.thickness_mm;
        facade.price_per_sqm = Price::rub(draft.price_per_sqm);
        facade.in_stock = draft.in_stock;
        facade.featured = draft.featured;
        facade.image = draft.image;
        facade.description = draft.description;
        Ok(())
    }

    /// Flip the featured flag, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns `FacadeNotFound` for an unknown ID.
    pub fn toggle_featured(&mut self, id: FacadeId) -> Result<bool, CatalogError> {
        let facade = self.facade_mut(id)?;
        facade.featured = !facade.featured;
        Ok(facade.featured)
    }

    /// Flip the in-stock flag, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns `FacadeNotFound` for an unknown ID.
    pub fn toggle_in_stock(&mut self, id: FacadeId) -> Result<bool, CatalogError> {
        let facade = self.facade_mut(id)?;
        facade.in_stock = !facade.in_stock;
        Ok(facade.in_stock)
    }

    /// Remove a facade, returning it.
    ///
    /// # Errors
    ///
    /// Returns `FacadeNotFound` for an unknown ID.
    pub fn remove_facade(&mut self, id: FacadeId) -> Result<Facade, CatalogError> {
        let index = self
            .facades
            .iter()
            .position(|f| f.id == id)
            .ok_or(CatalogError::FacadeNotFound(id))?;
        Ok(self.facades.remove(index))
    }

    /// Add a category, returning its new ID.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty name, a malformed slug or a taken slug.
    pub fn insert_category(
        &mut self,
        name: &str,
        slug: &str,
        description: &str,
    ) -> Result<CategoryId, CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::InvalidCategory("name is required".to_string()));
        }
        validate_slug(slug).map_err(CatalogError::InvalidCategory)?;
        if self.category_by_slug(slug).is_some() {
            return Err(CatalogError::DuplicateSlug(slug.to_string()));
        }

        let id = self
            .categories
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(CategoryId::new(1), |id| id.next());
        self.categories.push(Category {
            id,
            slug: slug.to_string(),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
        });
        Ok(id)
    }

    /// Rename a category and replace its description.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty name or an unknown category.
    pub fn rename_category(
        &mut self,
        id: CategoryId,
        name: &str,
        description: &str,
    ) -> Result<(), CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::InvalidCategory("name is required".to_string()));
        }
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CatalogError::CategoryNotFound(id))?;
        category.name = name.trim().to_string();
        category.description = description.trim().to_string();
        Ok(())
    }

    /// Remove a category that no facade references.
    ///
    /// # Errors
    ///
    /// Returns `CategoryInUse` while facades still point at it.
    pub fn remove_category(&mut self, id: CategoryId) -> Result<Category, CatalogError> {
        let count = self.count_in_category(id);
        if count > 0 {
            return Err(CatalogError::CategoryInUse { id, count });
        }
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(CatalogError::CategoryNotFound(id))?;
        Ok(self.categories.remove(index))
    }

    fn facade_mut(&mut self, id: FacadeId) -> Result<&mut Facade, CatalogError> {
        self.facades
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(CatalogError::FacadeNotFound(id))
    }

    fn ensure_category(&self, id: CategoryId) -> Result<(), CatalogError> {
        self.category(id)
            .map(|_| ())
            .ok_or(CatalogError::CategoryNotFound(id))
    }
}
