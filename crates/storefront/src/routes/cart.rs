//! Cart route handlers.
//!
//! Mutations follow post/redirect/get: each POST changes the shopper's cart,
//! queues a notice and redirects.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use facade_shop_core::{
    CartError, CartLine, CartLineId, Coating, Color, Dimensions, FacadeId, LineConfiguration,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{CurrentShopper, PageContext};
use crate::models::Notice;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: i32,
    pub facade_id: i32,
    pub name: String,
    pub image: String,
    pub width: u32,
    pub height: u32,
    pub size: String,
    pub finish: String,
    pub quantity: u32,
    pub price_per_sqm: String,
    pub price: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.as_i32(),
            facade_id: line.facade_id.as_i32(),
            name: line.facade_name.clone(),
            image: line.image.clone(),
            width: line.dimensions.width_mm(),
            height: line.dimensions.height_mm(),
            size: line.dimensions.to_string(),
            finish: format!("{}, {}", line.coating.label(), line.color.label()),
            quantity: line.quantity,
            price_per_sqm: format!("{}/м²", line.price_per_sqm.display()),
            price: line.price().display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub subtotal: String,
    pub free_delivery: bool,
    pub free_delivery_threshold: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub page: PageContext,
    pub cart: CartView,
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub facade_id: FacadeId,
    pub width: u32,
    pub height: u32,
    pub quantity: Option<u32>,
    pub coating: Coating,
    pub color: Color,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub line_id: CartLineId,
    pub quantity: u32,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: CartLineId,
}

/// Display cart page.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    page: PageContext,
) -> impl IntoResponse {
    let settings = state.settings();
    let cart = shopper.with_cart(|cart| {
        let subtotal = cart.subtotal();
        CartView {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            item_count: cart.item_count(),
            subtotal: subtotal.display(),
            free_delivery: !cart.is_empty() && settings.free_delivery(subtotal),
            free_delivery_threshold: settings.free_delivery_threshold.display(),
        }
    });

    CartTemplate { page, cart }
}

/// Add a configured facade to the cart.
///
/// Invalid sizes or finishes send the shopper back to the product page with
/// a notice.
#[instrument(skip(state, shopper, session))]
pub async fn add(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let facade = state
        .catalog()
        .facade(form.facade_id)
        .ok_or_else(|| AppError::NotFound(format!("facade {}", form.facade_id)))?;

    let added = Dimensions::new(form.width, form.height)
        .map_err(CartError::from)
        .and_then(|dimensions| {
            let config = LineConfiguration {
                dimensions,
                quantity: form.quantity.unwrap_or(1),
                coating: form.coating,
                color: form.color,
            };
            shopper.with_cart(|cart| cart.add(facade, config))
        });

    match added {
        Ok(line_id) => {
            tracing::info!(facade_id = %facade.id, %line_id, "Added to cart");
            Notice::normal("Добавлено в корзину", facade.name.clone())
                .push(&session)
                .await?;
            Ok(Redirect::to("/cart"))
        }
        Err(e) => {
            Notice::destructive("Не удалось добавить в корзину", e.to_string())
                .push(&session)
                .await?;
            Ok(Redirect::to(&format!("/product/{}", facade.id)))
        }
    }
}

/// Change a line's quantity and, when given, its size. Quantity 0 removes it.
#[instrument(skip(shopper, session))]
pub async fn update(
    CurrentShopper(shopper): CurrentShopper,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let resize = match (form.width, form.height) {
        (Some(width), Some(height)) => match Dimensions::new(width, height) {
            Ok(dimensions) => Some(dimensions),
            Err(e) => {
                Notice::destructive("Неверный размер", e.to_string())
                    .push(&session)
                    .await?;
                return Ok(Redirect::to("/cart"));
            }
        },
        _ => None,
    };

    // Quantity first, so a merge sums the new quantity into the surviving
    // line. The cart is replaced only when both steps succeed.
    let updated = shopper.with_cart(|cart| {
        let mut draft = cart.clone();
        draft.update_quantity(form.line_id, form.quantity)?;
        if form.quantity > 0
            && let Some(dimensions) = resize
        {
            let line_id = draft.update_dimensions(form.line_id, dimensions)?;
            tracing::debug!(%line_id, "Cart line resized");
        }
        *cart = draft;
        Ok::<_, CartError>(())
    });

    match updated {
        Ok(()) => {}
        Err(e @ CartError::LineNotFound(_)) => return Err(e.into()),
        Err(e) => {
            Notice::destructive("Не удалось обновить корзину", e.to_string())
                .push(&session)
                .await?;
        }
    }
    Ok(Redirect::to("/cart"))
}

/// Remove a line.
#[instrument(skip(shopper, session))]
pub async fn remove(
    CurrentShopper(shopper): CurrentShopper,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let line = shopper.with_cart(|cart| cart.remove(form.line_id))?;
    Notice::normal("Удалено из корзины", line.facade_name)
        .push(&session)
        .await?;
    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip_all)]
pub async fn clear(CurrentShopper(shopper): CurrentShopper, session: Session) -> Result<Redirect> {
    shopper.with_cart(facade_shop_core::CartStore::clear);
    Notice::normal("Корзина очищена", "")
        .push(&session)
        .await?;
    Ok(Redirect::to("/cart"))
}
