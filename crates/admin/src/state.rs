//! Application state shared across handlers.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

use facade_shop_core::content::{seed_comments, seed_news, seed_users};
use facade_shop_core::discount::seed_discounts;
use facade_shop_core::order::seed_orders;
use facade_shop_core::{
    Catalog, Comment, Discount, NewsArticle, Order, SiteSettings, UserAccount,
};

use crate::config::AdminConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Every collection is guarded by
/// its own `RwLock`; no handler holds two write guards at once.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    /// Argon2id PHC string of the back-office password.
    password_hash: String,
    catalog: RwLock<Catalog>,
    orders: RwLock<Vec<Order>>,
    users: RwLock<Vec<UserAccount>>,
    comments: RwLock<Vec<Comment>>,
    news: RwLock<Vec<NewsArticle>>,
    discounts: RwLock<Vec<Discount>>,
    settings: RwLock<SiteSettings>,
}

impl AppState {
    /// Create the state with seed data and hash the configured password.
    ///
    /// # Errors
    ///
    /// Returns an error if the password cannot be hashed.
    pub fn new(config: AdminConfig) -> Result<Self, password_hash::Error> {
        let catalog = Catalog::seed();
        let orders = seed_orders(&catalog);

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(config.password.expose_secret().as_bytes(), &salt)?
            .to_string();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                password_hash,
                catalog: RwLock::new(catalog),
                orders: RwLock::new(orders),
                users: RwLock::new(seed_users()),
                comments: RwLock::new(seed_comments()),
                news: RwLock::new(seed_news()),
                discounts: RwLock::new(seed_discounts()),
                settings: RwLock::new(SiteSettings::default()),
            }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Check a login attempt against the configured password.
    #[must_use]
    pub fn verify_password(&self, candidate: &str) -> bool {
        PasswordHash::new(&self.inner.password_hash).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &RwLock<Catalog> {
        &self.inner.catalog
    }

    #[must_use]
    pub fn orders(&self) -> &RwLock<Vec<Order>> {
        &self.inner.orders
    }

    #[must_use]
    pub fn users(&self) -> &RwLock<Vec<UserAccount>> {
        &self.inner.users
    }

    #[must_use]
    pub fn comments(&self) -> &RwLock<Vec<Comment>> {
        &self.inner.comments
    }

    #[must_use]
    pub fn news(&self) -> &RwLock<Vec<NewsArticle>> {
        &self.inner.news
    }

    #[must_use]
    pub fn discounts(&self) -> &RwLock<Vec<Discount>> {
        &self.inner.discounts
    }

    #[must_use]
    pub fn settings(&self) -> &RwLock<SiteSettings> {
        &self.inner.settings
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_verify_password() {
        let config = AdminConfig::new(
            "http://localhost:3001",
            SecretString::from("t9#Lw2!vQz7@Rb4e"),
        );
        let state = AppState::new(config).unwrap();
        assert!(state.verify_password("t9#Lw2!vQz7@Rb4e"));
        assert!(!state.verify_password("t9#Lw2!vQz7@Rb4"));
        assert!(!state.verify_password(""));
    }

    #[tokio::test]
    async fn test_seed_data_loaded() {
        let config = AdminConfig::new("http://localhost:3001", SecretString::from("k"));
        let state = AppState::new(config).unwrap();
        assert!(!state.catalog().read().await.facades().is_empty());
        assert!(!state.orders().read().await.is_empty());
        assert_eq!(state.users().read().await.len(), 5);
    }
}
