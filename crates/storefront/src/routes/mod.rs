//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /health                  - Health check
//!
//! # Catalog
//! GET  /catalog                 - Filterable facade list
//! GET  /product/{id}            - Facade detail with price calculator
//! GET  /product/{id}/quote      - Price for width/height/quantity (JSON)
//!
//! # Cart
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add a configured facade
//! POST /cart/update             - Change quantity and size of a line
//! POST /cart/remove             - Remove a line
//! POST /cart/clear              - Empty the cart
//!
//! # Favorites
//! GET  /favorites               - Favorites page
//! POST /favorites/add           - Add a facade
//! POST /favorites/remove        - Remove a facade
//! POST /favorites/clear         - Empty favorites
//! POST /favorites/move          - Move one favorite into the cart
//! POST /favorites/move-all      - Move every favorite into the cart
//!
//! # Ordering
//! GET  /checkout                - Contact form
//! POST /checkout                - Place the order
//! GET  /custom-order            - Custom fabrication form
//! POST /custom-order            - Submit the form (multipart)
//!
//! # Content
//! GET  /about, /contact         - Static pages
//! GET  /news, /news/{id}        - News list and article
//!
//! # Auth
//! GET  /login, POST /login      - Password login
//! GET  /register, POST /register
//! POST /logout
//! GET  /account                 - Profile and orders (requires login)
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod custom_order;
pub mod favorites;
pub mod home;
pub mod news;
pub mod pages;
pub mod products;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;

/// Multipart overhead allowed on top of the attachment itself.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the favorites routes router.
pub fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::show))
        .route("/add", post(favorites::add))
        .route("/remove", post(favorites::remove))
        .route("/clear", post(favorites::clear))
        .route("/move", post(favorites::move_one))
        .route("/move-all", post(favorites::move_all))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/quote", get(products::quote))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/account", get(account::index))
}

/// Create all routes for the storefront.
pub fn routes(max_upload_bytes: u64) -> Router<AppState> {
    let body_limit = usize::try_from(max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES))
        .unwrap_or(usize::MAX);

    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/catalog", get(catalog::index))
        .nest("/product", product_routes())
        .nest("/cart", cart_routes())
        .nest("/favorites", favorites_routes())
        .route("/checkout", get(checkout::show).post(checkout::place_order))
        .route(
            "/custom-order",
            get(custom_order::show)
                .post(custom_order::submit)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        .route("/news", get(news::index))
        .route("/news/{id}", get(news::show))
        .merge(auth_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
