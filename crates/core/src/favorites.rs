//! Favorites store.
//!
//! Holds at most one [`FavoriteItem`] per [`FacadeId`] in insertion order.
//! Moving items into the cart goes through a [`CartSink`] handed to the store
//! when it is built, so the favorites store never has to know how the cart
//! is stored or priced.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{FacadeId, Price};

/// A favorited product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub id: FacadeId,
    pub name: String,
    /// Price per m² at the time the item was favorited.
    pub price: Price,
    pub image: String,
    pub category: Option<String>,
}

/// Error reported by a [`CartSink`] that refused an item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CartSinkError(pub String);

/// Receiver for items moved out of favorites.
///
/// Implemented by whatever owns the shopper's cart.
pub trait CartSink {
    /// Put one favorite into the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot accept the item (for example the
    /// product is no longer in the catalog).
    fn add_favorite(&mut self, item: &FavoriteItem) -> Result<(), CartSinkError>;
}

/// Errors from favorites operations that involve the cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FavoritesError {
    #[error("facade {0} is not in favorites")]
    NotInFavorites(FacadeId),
    #[error("no cart is connected to this favorites list")]
    CartUnavailable,
    #[error("cart rejected facade {id}: {source}")]
    Rejected {
        id: FacadeId,
        #[source]
        source: CartSinkError,
    },
}

/// Outcome of [`FavoritesStore::move_all_to_cart`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveSummary {
    /// Items now in the cart and no longer in favorites.
    pub moved: Vec<FacadeId>,
    /// Items the cart refused; they stay in favorites.
    pub kept: Vec<(FacadeId, CartSinkError)>,
}

/// The favorites list of one shopper.
#[derive(Default)]
pub struct FavoritesStore {
    items: Vec<FavoriteItem>,
    cart: Option<Box<dyn CartSink + Send>>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("items", &self.items)
            .field("cart", &self.cart.as_ref().map(|_| "connected"))
            .finish()
    }
}

impl FavoritesStore {
    /// An empty list with no cart connected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty list that moves items into `cart`.
    #[must_use]
    pub fn with_cart(cart: Box<dyn CartSink + Send>) -> Self {
        Self {
            items: Vec::new(),
            cart: Some(cart),
        }
    }

    /// Insert `item` unless an entry with the same ID exists.
    ///
    /// Returns `true` if the item was inserted. Re-adding an existing ID
    /// leaves both size and order unchanged.
    pub fn add_item(&mut self, item: FavoriteItem) -> bool {
        if self.is_in_favorites(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the entry with this ID. Returns the removed item, if any.
    pub fn remove_item(&mut self, id: FacadeId) -> Option<FavoriteItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Whether an entry with this ID exists.
    #[must_use]
    pub fn is_in_favorites(&self, id: FacadeId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Alias of [`Self::is_in_favorites`].
    #[must_use]
    pub fn is_favorite(&self, id: FacadeId) -> bool {
        self.is_in_favorites(id)
    }

    /// Remove every entry.
    pub fn clear_favorites(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Move one item into the connected cart.
    ///
    /// The item leaves favorites only after the cart accepted it.
    ///
    /// # Errors
    ///
    /// - [`FavoritesError::NotInFavorites`] for an unknown ID
    /// - [`FavoritesError::CartUnavailable`] when no cart is connected
    /// - [`FavoritesError::Rejected`] when the cart refused the item
    pub fn move_to_cart(&mut self, id: FacadeId) -> Result<(), FavoritesError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(FavoritesError::NotInFavorites(id))?;
        let cart = self.cart.as_mut().ok_or(FavoritesError::CartUnavailable)?;

        if let Some(item) = self.items.get(index) {
            cart.add_favorite(item)
                .map_err(|source| FavoritesError::Rejected { id, source })?;
        }
        self.items.remove(index);
        Ok(())
    }

    /// Move every item into the connected cart, in order.
    ///
    /// Items the cart refuses stay in favorites and are reported in
    /// [`MoveSummary::kept`].
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::CartUnavailable`] when no cart is connected;
    /// the list is left untouched.
    pub fn move_all_to_cart(&mut self) -> Result<MoveSummary, FavoritesError> {
        let cart = self.cart.as_mut().ok_or(FavoritesError::CartUnavailable)?;

        let mut summary = MoveSummary::default();
        self.items.retain(|item| match cart.add_favorite(item) {
            Ok(()) => {
                summary.moved.push(item.id);
                false
            }
            Err(e) => {
                summary.kept.push((item.id, e));
                true
            }
        });
        Ok(summary)
    }
}
