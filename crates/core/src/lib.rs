//! Facade Shop Core - Shared domain library.
//!
//! This crate provides the domain used across all Facade Shop components:
//! - `storefront` - Public-facing shop (catalog, cart, favorites, checkout)
//! - `admin` - Back-office for catalog and order management
//! - `cli` - Command-line tools for quotes and catalog export
//!
//! # Architecture
//!
//! The core crate contains only types, stores and pure calculations - no I/O,
//! no HTTP, no clock reads except where a caller passes `now` in. This keeps it
//! lightweight and testable in isolation.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails and statuses
//! - [`catalog`] - Facades, materials, coatings, the color palette and seed data
//! - [`pricing`] - Area based price calculation and size presets
//! - [`favorites`] - Favorites store with an injected cart sink
//! - [`cart`] - Cart store with derived line prices
//! - [`custom_order`] - Custom fabrication request validation
//! - [`order`] - Orders created from a cart
//! - [`discount`] - Promo codes
//! - [`analytics`] - Sales summaries over orders
//! - [`content`] - News, comments, user accounts and site settings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod content;
pub mod custom_order;
pub mod discount;
pub mod favorites;
pub mod order;
pub mod pricing;
pub mod types;

pub use analytics::SalesSummary;
pub use cart::{CartError, CartLine, CartStore, LineConfiguration, MAX_LINE_QUANTITY};
pub use catalog::{Catalog, CatalogQuery, Category, Color, Coating, Facade, Material, SortOrder};
pub use content::{Comment, NewsArticle, SiteSettings, UserAccount};
pub use custom_order::{CustomOrderError, CustomOrderForm, CustomOrderReceipt};
pub use discount::{Discount, DiscountError};
pub use favorites::{CartSink, FavoriteItem, FavoritesError, FavoritesStore, MoveSummary};
pub use order::{CustomerContact, Order, OrderError};
pub use pricing::{Dimensions, PricingError, SizePreset, calculate_price};
pub use types::*;
