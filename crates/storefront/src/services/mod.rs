//! Storefront services.
//!
//! - `auth` - Password registration and login against the user directory
//! - `shoppers` - Per-visitor favorites and cart stores

pub mod auth;
pub mod shoppers;
