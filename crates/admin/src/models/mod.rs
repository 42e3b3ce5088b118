//! Admin data models.

pub mod flash;
pub mod session;

pub use flash::{Flash, FlashKind};
pub use session::CurrentAdmin;
pub use session::keys as session_keys;
