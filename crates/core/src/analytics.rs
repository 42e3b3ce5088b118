//! Sales summaries over orders.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::order::Order;
use crate::types::{FacadeId, OrderStatus, Price};

/// How many facades the top-sellers list keeps.
pub const TOP_FACADES: usize = 5;

/// Units sold of one facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacadeSales {
    pub facade_id: FacadeId,
    pub name: String,
    pub units: u32,
    pub revenue: Price,
}

/// Aggregates for the analytics page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    /// Sum of totals of orders that were not cancelled.
    pub revenue: Price,
    pub order_count: usize,
    /// `revenue` divided by the number of non-cancelled orders.
    pub average_order_value: Price,
    /// Count per status, in lifecycle order.
    pub by_status: Vec<(OrderStatus, usize)>,
    /// Best sellers by units, ties broken by name.
    pub top_facades: Vec<FacadeSales>,
}

impl SalesSummary {
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        let counted: Vec<&Order> = orders
            .iter()
            .filter(|order| order.status != OrderStatus::Cancelled)
            .collect();

        let revenue: Price = counted.iter().map(|order| order.total).sum();
        let average_order_value = match u32::try_from(counted.len()) {
            Ok(0) | Err(_) => Price::zero(),
            Ok(n) => Price::new(revenue.amount / Decimal::from(n), revenue.currency_code)
                .round_whole(),
        };

        let by_status = OrderStatus::ALL
            .iter()
            .map(|&status| {
                let count = orders.iter().filter(|order| order.status == status).count();
                (status, count)
            })
            .collect();

        let mut sales: HashMap<FacadeId, FacadeSales> = HashMap::new();
        for line in counted.iter().flat_map(|order| &order.lines) {
            let entry = sales.entry(line.facade_id).or_insert_with(|| FacadeSales {
                facade_id: line.facade_id,
                name: line.facade_name.clone(),
                units: 0,
                revenue: Price::zero(),
            });
            entry.units += line.quantity;
            entry.revenue = entry.revenue + line.price;
        }
        let mut top_facades: Vec<FacadeSales> = sales.into_values().collect();
        top_facades.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.name.cmp(&b.name)));
        top_facades.truncate(TOP_FACADES);

        Self {
            revenue,
            order_count: orders.len(),
            average_order_value,
            by_status,
            top_facades,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::order::seed_orders;

    #[test]
    fn test_empty_orders() {
        let summary = SalesSummary::from_orders(&[]);
        assert!(summary.revenue.is_zero());
        assert!(summary.average_order_value.is_zero());
        assert_eq!(summary.order_count, 0);
        assert!(summary.top_facades.is_empty());
        assert!(summary.by_status.iter().all(|(_, count)| *count == 0));
    }

    #[test]
    fn test_cancelled_orders_are_excluded_from_revenue() {
        let orders = seed_orders(&Catalog::seed());
        let summary = SalesSummary::from_orders(&orders);

        let expected: Price = orders
            .iter()
            .filter(|order| order.status != OrderStatus::Cancelled)
            .map(|order| order.total)
            .sum();
        assert_eq!(summary.revenue, expected);
        assert_eq!(summary.order_count, orders.len());

        let cancelled = summary
            .by_status
            .iter()
            .find(|(status, _)| *status == OrderStatus::Cancelled)
            .unwrap();
        assert_eq!(cancelled.1, 1);

        let cancelled_facade = orders
            .iter()
            .find(|order| order.status == OrderStatus::Cancelled)
            .unwrap()
            .lines[0]
            .facade_id;
        assert!(
            summary
                .top_facades
                .iter()
                .all(|sales| sales.facade_id != cancelled_facade)
        );
    }

    #[test]
    fn test_top_facades_sorted_by_units() {
        let summary = SalesSummary::from_orders(&seed_orders(&Catalog::seed()));
        assert!(
            summary
                .top_facades
                .windows(2)
                .all(|pair| pair[0].units >= pair[1].units)
        );
        assert_eq!(summary.top_facades[0].units, 6);
    }
}
