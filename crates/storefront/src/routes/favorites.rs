//! Favorites route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use facade_shop_core::{FacadeId, FavoriteItem, FavoritesError, FavoritesStore};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{CurrentShopper, PageContext};
use crate::models::Notice;
use crate::state::AppState;
use crate::views::safe_return_path;

/// A saved facade as shown on the favorites page.
#[derive(Clone)]
pub struct FavoriteView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub category: String,
    pub price: String,
}

impl From<&FavoriteItem> for FavoriteView {
    fn from(item: &FavoriteItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            image: item.image.clone(),
            category: item.category.clone().unwrap_or_default(),
            price: format!("{}/м²", item.price.display()),
        }
    }
}

/// Favorites page template.
#[derive(Template, WebTemplate)]
#[template(path = "favorites.html")]
pub struct FavoritesTemplate {
    pub page: PageContext,
    pub items: Vec<FavoriteView>,
}

/// Form data naming one facade.
#[derive(Debug, Deserialize)]
pub struct FavoriteForm {
    pub facade_id: FacadeId,
    /// Page to go back to, e.g. the catalog the heart was clicked on.
    pub return_to: Option<String>,
}

/// Display favorites page.
#[instrument(skip_all)]
pub async fn show(CurrentShopper(shopper): CurrentShopper, page: PageContext) -> impl IntoResponse {
    let items = shopper.with_favorites(|favorites| {
        favorites.items().iter().map(FavoriteView::from).collect()
    });

    FavoritesTemplate { page, items }
}

/// Add a facade to favorites. Adding one twice keeps a single entry.
#[instrument(skip(state, shopper, session))]
pub async fn add(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    session: Session,
    Form(form): Form<FavoriteForm>,
) -> Result<Redirect> {
    let item = state
        .catalog()
        .favorite_item(form.facade_id)
        .ok_or_else(|| AppError::NotFound(format!("facade {}", form.facade_id)))?;
    let name = item.name.clone();

    if shopper.with_favorites(|favorites| favorites.add_item(item)) {
        Notice::normal("Добавлено в избранное", name)
            .push(&session)
            .await?;
    }

    Ok(Redirect::to(&safe_return_path(
        form.return_to.as_deref(),
        "/favorites",
    )))
}

/// Remove a facade from favorites. Removing a missing one is a no-op.
#[instrument(skip(shopper, session))]
pub async fn remove(
    CurrentShopper(shopper): CurrentShopper,
    session: Session,
    Form(form): Form<FavoriteForm>,
) -> Result<Redirect> {
    if let Some(item) = shopper.with_favorites(|favorites| favorites.remove_item(form.facade_id)) {
        Notice::normal("Удалено из избранного", item.name)
            .push(&session)
            .await?;
    }

    Ok(Redirect::to(&safe_return_path(
        form.return_to.as_deref(),
        "/favorites",
    )))
}

/// Empty favorites.
#[instrument(skip_all)]
pub async fn clear(CurrentShopper(shopper): CurrentShopper, session: Session) -> Result<Redirect> {
    shopper.with_favorites(FavoritesStore::clear_favorites);
    Notice::normal("Избранное очищено", "")
        .push(&session)
        .await?;
    Ok(Redirect::to("/favorites"))
}

/// Move one favorite into the cart.
///
/// The item leaves favorites only once the cart has accepted it.
#[instrument(skip(shopper, session))]
pub async fn move_one(
    CurrentShopper(shopper): CurrentShopper,
    session: Session,
    Form(form): Form<FavoriteForm>,
) -> Result<Redirect> {
    match shopper.with_favorites(|favorites| favorites.move_to_cart(form.facade_id)) {
        Ok(()) => {
            Notice::normal("Перенесено в корзину", "Размер 400 × 700 мм, его можно изменить в корзине")
                .push(&session)
                .await?;
            Ok(Redirect::to("/cart"))
        }
        Err(e @ FavoritesError::Rejected { .. }) => {
            Notice::destructive("Не удалось перенести в корзину", e.to_string())
                .push(&session)
                .await?;
            Ok(Redirect::to("/favorites"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Move every favorite into the cart. Items the cart rejects stay in
/// favorites and are reported.
#[instrument(skip_all)]
pub async fn move_all(CurrentShopper(shopper): CurrentShopper, session: Session) -> Result<Redirect> {
    let summary = shopper.with_favorites(FavoritesStore::move_all_to_cart)?;

    if !summary.moved.is_empty() {
        Notice::normal(
            "Перенесено в корзину",
            format!("Позиций: {}", summary.moved.len()),
        )
        .push(&session)
        .await?;
    }
    for (facade_id, reason) in summary.kept {
        tracing::warn!(%facade_id, %reason, "Favorite not moved to cart");
        Notice::destructive("Осталось в избранном", reason.to_string())
            .push(&session)
            .await?;
    }

    Ok(Redirect::to(if shopper.with_favorites(|f| f.is_empty()) {
        "/cart"
    } else {
        "/favorites"
    }))
}
