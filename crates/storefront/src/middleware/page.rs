//! Data every full page needs for its header and notices.

use axum::{extract::FromRequestParts, http::request::Parts};
use facade_shop_core::SiteSettings;
use tower_sessions::Session;

use super::{CurrentShopper, OptionalAuth};
use crate::error::AppError;
use crate::models::{CurrentUser, Notice};
use crate::state::AppState;

/// Header badges, the logged-in user and pending notices.
///
/// Extracting this consumes the pending notices, so only handlers that render
/// a page should ask for it.
pub struct PageContext {
    pub user: Option<CurrentUser>,
    pub cart_count: u32,
    pub favorites_count: usize,
    pub notices: Vec<Notice>,
    pub settings: SiteSettings,
}

impl FromRequestParts<AppState> for PageContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let OptionalAuth(user) = OptionalAuth::from_request_parts(parts, state)
            .await
            .unwrap_or(OptionalAuth(None));
        let CurrentShopper(shopper) = CurrentShopper::from_request_parts(parts, state).await?;
        let notices = match parts.extensions.get::<Session>() {
            Some(session) => Notice::take_all(session).await?,
            None => Vec::new(),
        };
        let (cart_count, favorites_count) = shopper.counts();

        Ok(Self {
            user,
            cart_count,
            favorites_count,
            notices,
            settings: state.settings().clone(),
        })
    }
}
