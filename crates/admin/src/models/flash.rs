//! One-shot messages carried across a post/redirect/get cycle.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::session_keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, FlashKind::Error)
    }

    /// Store this message for the next rendered page, replacing any pending one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn set(self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.insert(session_keys::FLASH, self).await
    }

    /// Remove and return the pending message.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read or written.
    pub async fn take(session: &Session) -> Result<Option<Self>, tower_sessions::session::Error> {
        session.remove::<Self>(session_keys::FLASH).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_flash_is_taken_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        Flash::success("Сохранено").set(&session).await.unwrap();
        Flash::error("Категория используется")
            .set(&session)
            .await
            .unwrap();

        let flash = Flash::take(&session).await.unwrap().unwrap();
        assert!(flash.is_error());
        assert!(Flash::take(&session).await.unwrap().is_none());
    }
}
