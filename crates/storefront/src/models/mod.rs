//! Types the storefront keeps in the session.

pub mod notice;
pub mod session;

pub use notice::{Notice, Severity};
pub use session::{CurrentUser, ShopperId, keys as session_keys};
