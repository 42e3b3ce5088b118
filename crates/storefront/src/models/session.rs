//! Session-related types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use facade_shop_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

/// Identifies the favorites and cart of one visitor.
///
/// Created on the first request that touches either store and kept in the
/// session, so it survives login and logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopperId(Uuid);

impl ShopperId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ShopperId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the visitor's shopper ID.
    pub const SHOPPER_ID: &str = "shopper_id";

    /// Key for notices waiting to be shown.
    pub const NOTICES: &str = "notices";
}
