//! HTTP route handlers for admin.
//!
//! Everything is mounted under `/admin`.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                           - Dashboard counters
//! GET  /login, POST /login         - Password login
//! POST /logout                     - Logout
//!
//! # Catalog
//! GET  /products                   - Facade list (?q=, ?category=)
//! GET  /products/new               - New facade form
//! POST /products                   - Create facade
//! GET  /products/{id}/edit         - Edit form
//! POST /products/{id}              - Update facade
//! POST /products/{id}/delete       - Delete facade
//! POST /products/{id}/featured     - Toggle featured
//! POST /products/{id}/stock        - Toggle in-stock
//! GET  /categories                 - Category list with create form
//! POST /categories                 - Create category
//! POST /categories/{id}            - Rename category
//! POST /categories/{id}/delete     - Delete unused category
//!
//! # Sales
//! GET  /orders                     - Order list (?status=)
//! GET  /orders/{id}                - Order detail
//! POST /orders/{id}/status         - Status transition
//! GET  /analytics                  - Sales summary
//! GET  /discounts, POST /discounts - Promo codes
//! POST /discounts/{id}/toggle      - Activate or deactivate
//! POST /discounts/{id}/delete      - Delete promo code
//!
//! # People and content
//! GET  /users                      - Registered users
//! POST /users/{id}/role            - Change role
//! POST /users/{id}/block           - Block or unblock
//! GET  /comments                   - Product comments (?show=pending)
//! POST /comments/{id}/approve      - Approve
//! POST /comments/{id}/delete       - Delete
//! GET  /news, GET /news/new        - Articles and new article form
//! POST /news                       - Create article
//! GET  /news/{id}/edit             - Edit form with preview
//! POST /news/{id}                  - Update article
//! POST /news/{id}/delete           - Delete article
//! GET  /settings, POST /settings   - Store settings
//! ```

pub mod analytics;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod dashboard;
pub mod discounts;
pub mod news;
pub mod orders;
pub mod products;
pub mod settings;
pub mod users;

use askama::Template;
use axum::{
    Router,
    response::{Html, Redirect},
    routing::get,
};
use tower_sessions::Session;

use crate::error::Result;
use crate::models::Flash;
use crate::state::AppState;

/// Build the back-office router, relative to `/admin`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .merge(auth::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(orders::router())
        .merge(users::router())
        .route("/analytics", get(analytics::index))
        .merge(comments::router())
        .merge(news::router())
        .merge(discounts::router())
        .route("/settings", get(settings::show).post(settings::update))
}

/// Render a template, logging render failures instead of panicking.
pub(crate) fn render(template: &impl Template) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Queue a message and redirect (post/redirect/get).
pub(crate) async fn redirect_with(session: &Session, flash: Flash, to: &str) -> Result<Redirect> {
    flash.set(session).await?;
    Ok(Redirect::to(to))
}

