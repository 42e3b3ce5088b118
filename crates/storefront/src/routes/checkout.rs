//! Checkout: contact form and order placement.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use facade_shop_core::discount::find_usable;
use facade_shop_core::{CustomerContact, Email, Order};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{CurrentShopper, OptionalAuth, PageContext};
use crate::models::Notice;
use crate::routes::cart::CartLineView;
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub page: PageContext,
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub free_delivery: bool,
    pub name: String,
    pub email: String,
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub promo: String,
}

/// Display the checkout form. An empty cart goes back to the cart page.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    page: PageContext,
) -> Response {
    let summary = shopper.with_cart(|cart| {
        (!cart.is_empty()).then(|| {
            (
                cart.lines().iter().map(CartLineView::from).collect::<Vec<_>>(),
                cart.subtotal(),
            )
        })
    });
    let Some((lines, subtotal)) = summary else {
        return Redirect::to("/cart").into_response();
    };

    let (name, email) = page
        .user
        .as_ref()
        .map(|user| (user.name.clone(), user.email.to_string()))
        .unwrap_or_default();

    CheckoutTemplate {
        free_delivery: state.settings().free_delivery(subtotal),
        subtotal: subtotal.display(),
        lines,
        name,
        email,
        page,
    }
    .into_response()
}

/// Place the order.
///
/// Validation problems send the shopper back to the form with a notice; the
/// cart is emptied only once the order exists.
#[instrument(skip(state, shopper, session, form), fields(user_id))]
pub async fn place_order(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Redirect> {
    let contact = Email::parse(&form.email)
        .map_err(|e| e.to_string())
        .and_then(|email| {
            CustomerContact::new(&form.name, &form.phone, email, &form.address, &form.comment)
                .map_err(|e| e.to_string())
        });
    let contact = match contact {
        Ok(contact) => contact,
        Err(reason) => return reject(&session, reason).await,
    };

    let now = Utc::now();
    let discount = if form.promo.trim().is_empty() {
        None
    } else {
        match find_usable(state.discounts(), &form.promo, now) {
            Ok(discount) => Some(discount),
            Err(e) => return reject(&session, e.to_string()).await,
        }
    };

    let id = state.next_order_id();
    let placed = shopper.with_cart(|cart| {
        let order = Order::from_cart(id, cart, contact, discount, now)?;
        cart.clear();
        Ok::<_, facade_shop_core::OrderError>(order)
    });
    let mut order = match placed {
        Ok(order) => order,
        Err(e) => return reject(&session, e.to_string()).await,
    };
    if let Some(user) = &user {
        tracing::Span::current().record("user_id", user.id.as_i32());
        order = order.placed_by(user.id);
    }

    tracing::info!(
        order_number = %order.number,
        total = %order.total.amount,
        "Order placed"
    );
    let notice = Notice::normal(
        format!("Заказ {} оформлен", order.number),
        format!("Сумма {}. Мы перезвоним для подтверждения.", order.total.display()),
    );
    // The cart is already empty, so the order is stored before the session write.
    state.orders().write().await.push(order);
    notice.push(&session).await?;

    Ok(Redirect::to(if user.is_some() { "/account" } else { "/" }))
}

async fn reject(session: &Session, reason: String) -> Result<Redirect> {
    Notice::destructive("Заказ не оформлен", reason)
        .push(session)
        .await
        .map_err(AppError::from)?;
    Ok(Redirect::to("/checkout"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use facade_shop_core::{Dimensions, FacadeId, LineConfiguration};
    use tower_sessions::session::{Id, Record};
    use tower_sessions::session_store::{self, SessionStore};

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::models::ShopperId;

    /// A store whose backend is always down.
    #[derive(Debug)]
    struct UnavailableStore;

    #[async_trait::async_trait]
    impl SessionStore for UnavailableStore {
        async fn save(&self, _record: &Record) -> session_store::Result<()> {
            Err(session_store::Error::Backend("unavailable".to_string()))
        }

        async fn load(&self, _id: &Id) -> session_store::Result<Option<Record>> {
            Err(session_store::Error::Backend("unavailable".to_string()))
        }

        async fn delete(&self, _id: &Id) -> session_store::Result<()> {
            Err(session_store::Error::Backend("unavailable".to_string()))
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Анна".to_string(),
            phone: "+7 900 000-00-00".to_string(),
            email: "anna@example.com".to_string(),
            address: String::new(),
            comment: String::new(),
            promo: String::new(),
        }
    }

    #[tokio::test]
    async fn test_order_is_kept_when_notice_cannot_be_saved() {
        let state = AppState::new(StorefrontConfig::new("http://localhost:3000"));
        let shopper = state.shoppers().get_or_create(ShopperId::generate()).await;
        let facade = state.catalog().facade(FacadeId::new(1)).unwrap().clone();
        let config =
            LineConfiguration::default_for(&facade, Dimensions::new(400, 600).unwrap()).unwrap();
        shopper.with_cart(|cart| cart.add(&facade, config)).unwrap();

        let session = Session::new(Some(Id::default()), Arc::new(UnavailableStore), None);
        let placed = place_order(
            State(state.clone()),
            CurrentShopper(Arc::clone(&shopper)),
            OptionalAuth(None),
            session,
            Form(form()),
        )
        .await;

        assert!(placed.is_err());
        assert!(shopper.with_cart(|cart| cart.is_empty()));
        let orders = state.orders().read().await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders.last().unwrap().contact.name, "Анна");
    }
}
