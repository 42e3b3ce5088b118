//! Account route handlers.
//!
//! These routes require authentication.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use facade_shop_core::Order;
use tracing::instrument;

use crate::filters;
use crate::middleware::{PageContext, RequireAuth};
use crate::state::AppState;

/// Order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub number: String,
    pub date: String,
    pub items: u32,
    pub total: String,
    pub discount: Option<String>,
    pub status: &'static str,
    pub status_class: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            number: order.number.clone(),
            date: order.created_at.format("%d.%m.%Y").to_string(),
            items: order.item_count(),
            total: order.total.display(),
            discount: order
                .discount
                .as_ref()
                .map(|d| format!("{} (−{}%)", d.code, d.percent)),
            status: order.status.label(),
            status_class: format!("status--{}", order.status),
        }
    }
}

/// Account overview page template.
#[derive(Template, WebTemplate)]
#[template(path = "account.html")]
pub struct AccountTemplate {
    pub page: PageContext,
    pub name: String,
    pub email: String,
    pub registered_on: Option<String>,
    pub orders: Vec<OrderView>,
}

/// Display the profile and the user's orders, newest first.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    page: PageContext,
) -> impl IntoResponse {
    let registered_on = state
        .users()
        .registered_at(&user.email)
        .await
        .map(|at| at.format("%d.%m.%Y").to_string());

    let orders = state
        .orders()
        .read()
        .await
        .iter()
        .rev()
        .filter(|order| order.user_id == Some(user.id))
        .map(OrderView::from)
        .collect();

    AccountTemplate {
        page,
        name: user.name,
        email: user.email.to_string(),
        registered_on,
        orders,
    }
}
