//! Order management route handlers.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use facade_shop_core::{Order, OrderId, OrderStatus};

use crate::{
    components::{DataTableConfig, data_table::orders_table_config},
    error::{AppError, Result},
    filters,
    middleware::RequireAdminAuth,
    models::Flash,
    state::AppState,
};

use super::{redirect_with, render};

const ORDERS_PATH: &str = "/admin/orders";

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(index))
        .route("/orders/{id}", get(show))
        .route("/orders/{id}/status", post(transition))
}

#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
}

impl OrdersQuery {
    /// The requested status. Empty or unknown values show everything.
    fn status(&self) -> Option<OrderStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Order row for the list.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub id: i32,
    pub number: String,
    pub customer: String,
    pub created: String,
    pub items: u32,
    pub total: String,
    pub status: &'static str,
    pub status_class: &'static str,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_i32(),
            number: order.number.clone(),
            customer: order.contact.name.clone(),
            created: order.created_at.format("%d.%m.%Y %H:%M").to_string(),
            items: order.item_count(),
            total: order.total.display(),
            status: order.status.label(),
            status_class: status_class(order.status),
        }
    }
}

/// Badge class per status.
const fn status_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::New => "badge badge--info",
        OrderStatus::Processing => "badge badge--warning",
        OrderStatus::Shipped => "badge badge--accent",
        OrderStatus::Delivered => "badge badge--success",
        OrderStatus::Cancelled => "badge badge--muted",
    }
}

#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub table: DataTableConfig,
    pub orders: Vec<OrderRow>,
}

/// One order line on the detail page.
#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub name: String,
    pub size: String,
    pub finish: String,
    pub quantity: u32,
    pub price_per_sqm: String,
    pub price: String,
}

/// A status the order may move to.
#[derive(Debug, Clone)]
pub struct TransitionView {
    pub value: String,
    pub label: &'static str,
}

#[derive(Template)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub order: OrderRow,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub comment: String,
    pub lines: Vec<OrderLineView>,
    pub subtotal: String,
    pub discount: Option<String>,
    pub transitions: Vec<TransitionView>,
}

#[derive(Debug, Deserialize)]
pub struct TransitionForm {
    pub status: String,
}

#[instrument(skip(state, session))]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<OrdersQuery>,
) -> Result<Html<String>> {
    let flash = Flash::take(&session).await?;
    let wanted = query.status();

    let orders: Vec<OrderRow> = {
        let orders = state.orders().read().await;
        let mut matching: Vec<&Order> = orders
            .iter()
            .filter(|o| wanted.is_none_or(|status| o.status == status))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.into_iter().map(OrderRow::from).collect()
    };

    let status = wanted.map(|s| s.to_string());
    Ok(render(&OrdersIndexTemplate {
        current_path: ORDERS_PATH,
        flash,
        table: orders_table_config(status.as_deref()),
        orders,
    }))
}

#[instrument(skip(state, session))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<OrderId>,
) -> Result<Html<String>> {
    let flash = Flash::take(&session).await?;
    let orders = state.orders().read().await;
    let order = orders
        .iter()
        .find(|o| o.id == id)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let lines = order
        .lines
        .iter()
        .map(|line| OrderLineView {
            name: line.facade_name.clone(),
            size: line.dimensions.to_string(),
            finish: format!("{}, {}", line.coating.label(), line.color.label()),
            quantity: line.quantity,
            price_per_sqm: line.price_per_sqm.display(),
            price: line.price.display(),
        })
        .collect();

    let transitions = OrderStatus::ALL
        .iter()
        .filter(|next| order.status.can_transition_to(**next))
        .map(|next| TransitionView {
            value: next.to_string(),
            label: next.label(),
        })
        .collect();

    let template = OrderShowTemplate {
        current_path: ORDERS_PATH,
        flash,
        order: OrderRow::from(order),
        phone: order.contact.phone.clone(),
        email: order.contact.email.to_string(),
        address: order.contact.address.clone().unwrap_or_default(),
        comment: order.contact.comment.clone().unwrap_or_default(),
        lines,
        subtotal: order.subtotal.display(),
        discount: order
            .discount
            .as_ref()
            .map(|d| format!("{} (−{}%): −{}", d.code, d.percent, d.amount.display())),
        transitions,
    };
    drop(orders);

    Ok(render(&template))
}

#[instrument(skip(state, session))]
pub async fn transition(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<OrderId>,
    Form(form): Form<TransitionForm>,
) -> Result<Redirect> {
    let next: OrderStatus = form.status.parse().map_err(AppError::BadRequest)?;

    let result = {
        let mut orders = state.orders().write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
        let from = order.status;
        order.transition(next).map(|()| from)
    };

    let flash = match result {
        Ok(from) => {
            tracing::info!(order_id = %id, %from, to = %next, "Order status changed");
            Flash::success(format!("Статус заказа: {}", next.label()))
        }
        Err(err) => {
            tracing::warn!(order_id = %id, error = %err, "Order transition refused");
            Flash::error(format!("Нельзя перевести заказ в статус «{}»", next.label()))
        }
    };
    redirect_with(&session, flash, &format!("{ORDERS_PATH}/{id}")).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_filter_shows_all() {
        let query = OrdersQuery {
            status: Some("lost".to_string()),
        };
        assert_eq!(query.status(), None);

        let query = OrdersQuery {
            status: Some("shipped".to_string()),
        };
        assert_eq!(query.status(), Some(OrderStatus::Shipped));
    }
}
