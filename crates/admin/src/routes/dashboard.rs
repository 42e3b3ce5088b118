//! Dashboard route handler.

use askama::Template;
use axum::{extract::State, response::Html};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use facade_shop_core::{Order, OrderStatus, SalesSummary};

use crate::{
    error::Result, filters, middleware::RequireAdminAuth, models::Flash, state::AppState,
};

use super::render;

/// How many orders the dashboard lists.
const RECENT_ORDERS: usize = 5;

/// Dashboard metrics.
#[derive(Debug, Clone, Default)]
pub struct DashboardMetrics {
    pub facades: usize,
    pub out_of_stock: usize,
    pub categories: usize,
    pub orders: usize,
    pub new_orders: usize,
    pub revenue: String,
    pub users: usize,
    pub pending_comments: usize,
    pub active_discounts: usize,
}

/// Recent order view for dashboard.
#[derive(Debug, Clone)]
pub struct RecentOrderView {
    pub id: i32,
    pub number: String,
    pub customer_name: String,
    pub total: String,
    pub status: &'static str,
}

impl From<&Order> for RecentOrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_i32(),
            number: order.number.clone(),
            customer_name: order.contact.name.clone(),
            total: order.total.display(),
            status: order.status.label(),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub metrics: DashboardMetrics,
    pub recent_orders: Vec<RecentOrderView>,
}

/// Dashboard page handler.
#[instrument(skip_all)]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>> {
    let flash = Flash::take(&session).await?;

    let (facades, out_of_stock, categories) = {
        let catalog = state.catalog().read().await;
        (
            catalog.facades().len(),
            catalog.facades().iter().filter(|f| !f.in_stock).count(),
            catalog.categories().len(),
        )
    };

    let (orders, new_orders, revenue, recent_orders) = {
        let orders = state.orders().read().await;
        let summary = SalesSummary::from_orders(&orders);
        let mut recent: Vec<&Order> = orders.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        (
            orders.len(),
            orders
                .iter()
                .filter(|o| o.status == OrderStatus::New)
                .count(),
            summary.revenue.display(),
            recent
                .into_iter()
                .take(RECENT_ORDERS)
                .map(RecentOrderView::from)
                .collect(),
        )
    };

    let users = state.users().read().await.len();
    let pending_comments = state
        .comments()
        .read()
        .await
        .iter()
        .filter(|c| !c.approved)
        .count();
    let now = Utc::now();
    let active_discounts = state
        .discounts()
        .read()
        .await
        .iter()
        .filter(|d| d.is_usable(now))
        .count();

    let template = DashboardTemplate {
        current_path: "/admin",
        flash,
        metrics: DashboardMetrics {
            facades,
            out_of_stock,
            categories,
            orders,
            new_orders,
            revenue,
            users,
            pending_comments,
            active_discounts,
        },
        recent_orders,
    };

    Ok(render(&template))
}
