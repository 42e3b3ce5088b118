//! Shopper store extractor.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::{ShopperId, session_keys};
use crate::services::shoppers::Shopper;
use crate::state::AppState;

/// The favorites and cart of the visitor making the request.
///
/// Requires the session layer. Without it the request fails with a 500: that
/// is a wiring mistake, not something a visitor can cause.
pub struct CurrentShopper(pub Arc<Shopper>);

impl FromRequestParts<AppState> for CurrentShopper {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<Session>().ok_or_else(|| {
            AppError::Internal("shopper stores used without the session layer".to_string())
        })?;
        let id = shopper_id(session).await?;
        Ok(Self(state.shoppers().get_or_create(id).await))
    }
}

/// The session's shopper ID, assigned on first use.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn shopper_id(session: &Session) -> Result<ShopperId, tower_sessions::session::Error> {
    if let Some(id) = session.get::<ShopperId>(session_keys::SHOPPER_ID).await? {
        return Ok(id);
    }
    let id = ShopperId::generate();
    session.insert(session_keys::SHOPPER_ID, id).await?;
    Ok(id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::config::StorefrontConfig;

    #[tokio::test]
    async fn test_shopper_id_is_stable_within_session() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let first = shopper_id(&session).await.unwrap();
        let second = shopper_id(&session).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_session_layer_is_a_server_error() {
        let state = AppState::new(StorefrontConfig::new("http://localhost:3000"));
        let (mut parts, ()) = Request::builder().uri("/cart").body(()).unwrap().into_parts();

        let Err(rejection) = CurrentShopper::from_request_parts(&mut parts, &state).await else {
            panic!("extractor must fail without a session");
        };
        assert_eq!(
            rejection.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
