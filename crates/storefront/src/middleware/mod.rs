//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with an in-memory store)
//!
//! Extractors in this module read the session the layer installs.

pub mod auth;
pub mod page;
pub mod request_id;
pub mod session;
pub mod shopper;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use page::PageContext;
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
pub use shopper::CurrentShopper;
