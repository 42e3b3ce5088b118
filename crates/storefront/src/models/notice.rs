//! One-shot notices shown on the next rendered page.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::session_keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Normal,
    Destructive,
}

impl Severity {
    /// CSS modifier for the notice box.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Normal => "notice--normal",
            Self::Destructive => "notice--destructive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn normal(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Normal,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    /// Queue this notice for the next page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read or written.
    pub async fn push(self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        let mut pending: Vec<Self> = session
            .get(session_keys::NOTICES)
            .await?
            .unwrap_or_default();
        pending.push(self);
        session.insert(session_keys::NOTICES, pending).await
    }

    /// Remove and return all queued notices.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read or written.
    pub async fn take_all(session: &Session) -> Result<Vec<Self>, tower_sessions::session::Error> {
        Ok(session
            .remove::<Vec<Self>>(session_keys::NOTICES)
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_notices_are_shown_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        Notice::normal("Добавлено", "Фасад в корзине")
            .push(&session)
            .await
            .unwrap();
        Notice::destructive("Ошибка", "Заполните поля")
            .push(&session)
            .await
            .unwrap();

        let notices = Notice::take_all(&session).await.unwrap();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[1].severity, Severity::Destructive);
        assert!(Notice::take_all(&session).await.unwrap().is_empty());
    }
}
