//! Per-visitor favorites and cart stores.
//!
//! Every shopper owns one [`CartStore`] and one [`FavoritesStore`]. The
//! favorites store is wired to the cart through [`CatalogCartLink`], so moving
//! a favorite into the cart resolves the facade in the catalog and adds it in
//! the standard size.
//!
//! Locks are taken inside closures only, so no guard can live across an
//! `.await`. Lock order is favorites, then cart.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use facade_shop_core::favorites::CartSinkError;
use facade_shop_core::pricing::STANDARD_PRESET;
use facade_shop_core::{CartSink, CartStore, Catalog, FavoriteItem, FavoritesStore, LineConfiguration};
use moka::future::Cache;

use crate::models::ShopperId;

/// Shoppers kept in memory at most.
const MAX_SHOPPERS: u64 = 10_000;

/// Adds favorites to a cart in the standard size with the first offered finish.
pub struct CatalogCartLink {
    catalog: Arc<Catalog>,
    cart: Arc<Mutex<CartStore>>,
}

impl CatalogCartLink {
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>, cart: Arc<Mutex<CartStore>>) -> Self {
        Self { catalog, cart }
    }
}

impl CartSink for CatalogCartLink {
    fn add_favorite(&mut self, item: &FavoriteItem) -> Result<(), CartSinkError> {
        let facade = self
            .catalog
            .facade(item.id)
            .ok_or_else(|| CartSinkError(format!("{} is no longer sold", item.name)))?;
        let config = LineConfiguration::default_for(facade, STANDARD_PRESET.dimensions())
            .ok_or_else(|| CartSinkError(format!("{} has no finish options", item.name)))?;

        self.cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add(facade, config)
            .map(|_| ())
            .map_err(|e| CartSinkError(e.to_string()))
    }
}

/// The stores of one visitor.
#[derive(Debug)]
pub struct Shopper {
    cart: Arc<Mutex<CartStore>>,
    favorites: Mutex<FavoritesStore>,
}

impl Shopper {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let cart = Arc::new(Mutex::new(CartStore::new()));
        let link = CatalogCartLink::new(catalog, Arc::clone(&cart));
        Self {
            cart,
            favorites: Mutex::new(FavoritesStore::with_cart(Box::new(link))),
        }
    }

    /// Run `f` with the cart locked.
    pub fn with_cart<R>(&self, f: impl FnOnce(&mut CartStore) -> R) -> R {
        f(&mut self.cart.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Run `f` with the favorites locked. `f` may move items into the cart
    /// through the store's sink but must not call [`Self::with_cart`].
    pub fn with_favorites<R>(&self, f: impl FnOnce(&mut FavoritesStore) -> R) -> R {
        f(&mut self.favorites.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Header badge counts: (cart items, favorites).
    #[must_use]
    pub fn counts(&self) -> (u32, usize) {
        let favorites = self.with_favorites(|favorites| favorites.len());
        let cart = self.with_cart(|cart| cart.item_count());
        (cart, favorites)
    }
}

/// All live shoppers, evicted after the session idle timeout.
#[derive(Clone)]
pub struct ShopperRegistry {
    catalog: Arc<Catalog>,
    shoppers: Cache<ShopperId, Arc<Shopper>>,
}

impl ShopperRegistry {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, idle_timeout: Duration) -> Self {
        let shoppers = Cache::builder()
            .max_capacity(MAX_SHOPPERS)
            .time_to_idle(idle_timeout)
            .build();
        Self { catalog, shoppers }
    }

    /// The shopper for `id`, created empty on first use.
    pub async fn get_or_create(&self, id: ShopperId) -> Arc<Shopper> {
        let catalog = Arc::clone(&self.catalog);
        self.shoppers
            .get_with(id, async move {
                tracing::debug!(shopper_id = %id, "New shopper");
                Arc::new(Shopper::new(catalog))
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use facade_shop_core::{Dimensions, FacadeId, FavoritesError};

    use super::*;

    fn registry() -> ShopperRegistry {
        ShopperRegistry::new(Arc::new(Catalog::seed()), Duration::from_secs(60))
    }

    fn favorite(catalog: &Catalog, id: i32) -> FavoriteItem {
        catalog.favorite_item(FacadeId::new(id)).unwrap()
    }

    #[tokio::test]
    async fn test_same_id_same_shopper() {
        let registry = registry();
        let id = ShopperId::generate();
        let first = registry.get_or_create(id).await;
        let second = registry.get_or_create(id).await;
        assert!(Arc::ptr_eq(&first, &second));

        let other = registry.get_or_create(ShopperId::generate()).await;
        assert!(!Arc::ptr_eq(&first, &other));
    }

    #[tokio::test]
    async fn test_move_to_cart_uses_standard_size() {
        let catalog = Catalog::seed();
        let shopper = registry().get_or_create(ShopperId::generate()).await;
        shopper.with_favorites(|favorites| favorites.add_item(favorite(&catalog, 1)));

        shopper
            .with_favorites(|favorites| favorites.move_to_cart(FacadeId::new(1)))
            .unwrap();

        assert_eq!(shopper.counts(), (1, 0));
        let dimensions = shopper.with_cart(|cart| cart.lines()[0].dimensions);
        assert_eq!(dimensions, Dimensions::new(400, 700).unwrap());
    }

    #[tokio::test]
    async fn test_unknown_facade_stays_in_favorites() {
        let catalog = Catalog::seed();
        let shopper = registry().get_or_create(ShopperId::generate()).await;
        let mut ghost = favorite(&catalog, 1);
        ghost.id = FacadeId::new(999);
        shopper.with_favorites(|favorites| {
            favorites.add_item(favorite(&catalog, 2));
            favorites.add_item(ghost);
        });

        let summary = shopper
            .with_favorites(FavoritesStore::move_all_to_cart)
            .unwrap();
        assert_eq!(summary.moved, vec![FacadeId::new(2)]);
        assert_eq!(summary.kept.len(), 1);
        assert_eq!(shopper.counts(), (1, 1));

        let err = shopper
            .with_favorites(|favorites| favorites.move_to_cart(FacadeId::new(999)))
            .unwrap_err();
        assert!(matches!(err, FavoritesError::Rejected { .. }));
    }
}
