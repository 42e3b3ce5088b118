//! Application state shared across handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;

use facade_shop_core::content::{seed_comments, seed_news};
use facade_shop_core::discount::seed_discounts;
use facade_shop_core::{
    Catalog, Comment, CustomOrderReceipt, Discount, NewsArticle, Order, OrderId, SiteSettings,
};

use crate::config::StorefrontConfig;
use crate::middleware::session::SESSION_EXPIRY_SECONDS;
use crate::services::auth::UserDirectory;
use crate::services::shoppers::ShopperRegistry;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    news: Vec<NewsArticle>,
    comments: Vec<Comment>,
    discounts: Vec<Discount>,
    settings: SiteSettings,
    shoppers: ShopperRegistry,
    users: UserDirectory,
    orders: RwLock<Vec<Order>>,
    last_order_id: AtomicI32,
    custom_orders: RwLock<Vec<CustomOrderReceipt>>,
}

impl AppState {
    /// Create the state with the seed catalog and content.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_catalog(config, Catalog::seed())
    }

    /// Create the state around a specific catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        let idle = Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs());
        let shoppers = ShopperRegistry::new(Arc::clone(&catalog), idle);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                news: seed_news(),
                comments: seed_comments(),
                discounts: seed_discounts(),
                settings: SiteSettings::default(),
                shoppers,
                users: UserDirectory::new(),
                orders: RwLock::new(Vec::new()),
                last_order_id: AtomicI32::new(0),
                custom_orders: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn news(&self) -> &[NewsArticle] {
        &self.inner.news
    }

    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.inner.comments
    }

    #[must_use]
    pub fn discounts(&self) -> &[Discount] {
        &self.inner.discounts
    }

    #[must_use]
    pub fn settings(&self) -> &SiteSettings {
        &self.inner.settings
    }

    #[must_use]
    pub fn shoppers(&self) -> &ShopperRegistry {
        &self.inner.shoppers
    }

    #[must_use]
    pub fn users(&self) -> &UserDirectory {
        &self.inner.users
    }

    /// Placed orders.
    #[must_use]
    pub fn orders(&self) -> &RwLock<Vec<Order>> {
        &self.inner.orders
    }

    /// Reserve the next order ID.
    #[must_use]
    pub fn next_order_id(&self) -> OrderId {
        OrderId::new(self.inner.last_order_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Received custom fabrication requests.
    #[must_use]
    pub fn custom_orders(&self) -> &RwLock<Vec<CustomOrderReceipt>> {
        &self.inner.custom_orders
    }
}
