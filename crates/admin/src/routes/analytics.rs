//! Sales analytics page.

use askama::Template;
use axum::{extract::State, response::Html};
use tower_sessions::Session;
use tracing::instrument;

use facade_shop_core::SalesSummary;

use crate::{
    error::Result, filters, middleware::RequireAdminAuth, models::Flash, state::AppState,
};

use super::render;

#[derive(Debug, Clone)]
pub struct StatusCountView {
    pub label: &'static str,
    pub count: usize,
    /// Share of all orders, whole percent.
    pub share: usize,
}

#[derive(Debug, Clone)]
pub struct TopFacadeView {
    pub id: i32,
    pub name: String,
    pub units: u32,
    pub revenue: String,
}

#[derive(Template)]
#[template(path = "analytics.html")]
pub struct AnalyticsTemplate {
    pub current_path: &'static str,
    pub flash: Option<Flash>,
    pub revenue: String,
    pub order_count: usize,
    pub average_order_value: String,
    pub by_status: Vec<StatusCountView>,
    pub top_facades: Vec<TopFacadeView>,
}

impl From<&SalesSummary> for AnalyticsTemplate {
    fn from(summary: &SalesSummary) -> Self {
        let total = summary.order_count.max(1);
        Self {
            current_path: "/admin/analytics",
            flash: None,
            revenue: summary.revenue.display(),
            order_count: summary.order_count,
            average_order_value: summary.average_order_value.display(),
            by_status: summary
                .by_status
                .iter()
                .map(|(status, count)| StatusCountView {
                    label: status.label(),
                    count: *count,
                    share: count * 100 / total,
                })
                .collect(),
            top_facades: summary
                .top_facades
                .iter()
                .map(|sales| TopFacadeView {
                    id: sales.facade_id.as_i32(),
                    name: sales.name.clone(),
                    units: sales.units,
                    revenue: sales.revenue.display(),
                })
                .collect(),
        }
    }
}

/// Sales summary over every order.
#[instrument(skip_all)]
pub async fn index(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>> {
    let summary = SalesSummary::from_orders(&state.orders().read().await);
    let template = AnalyticsTemplate {
        flash: Flash::take(&session).await?,
        ..AnalyticsTemplate::from(&summary)
    };
    Ok(render(&template))
}

#[cfg(test)]
mod tests {
    use facade_shop_core::Catalog;
    use facade_shop_core::order::seed_orders;

    use super::*;

    #[test]
    fn test_status_shares() {
        let orders = seed_orders(&Catalog::seed());
        let template = AnalyticsTemplate::from(&SalesSummary::from_orders(&orders));
        assert_eq!(template.order_count, 5);
        assert!(template.by_status.iter().all(|s| s.share == 20));
        assert!(!template.top_facades.is_empty());
    }

    #[test]
    fn test_empty_summary() {
        let template = AnalyticsTemplate::from(&SalesSummary::from_orders(&[]));
        assert!(template.by_status.iter().all(|s| s.share == 0));
    }
}
