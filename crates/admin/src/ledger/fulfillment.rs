//! Batch fulfillment: which orders still have units to sell.
//!
//! An order is open while the units sold or spoiled against it are fewer
//! than the units it produced. Only open orders are offered as sale targets.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use hielitos_core::{OrderStatus, ProductionOrderId};

use crate::models::{ProductionOrder, Sale};

/// Sales totals drawn against one order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Consumption {
    sold: u64,
    spoiled: u64,
    revenue: Decimal,
}

fn consumption_by_order(sales: &[Sale]) -> HashMap<&ProductionOrderId, Consumption> {
    let mut totals: HashMap<&ProductionOrderId, Consumption> = HashMap::new();
    for sale in sales {
        let Some(order_id) = sale.order_id.as_ref() else {
            continue;
        };
        let entry = totals.entry(order_id).or_default();
        entry.sold += u64::from(sale.units_sold);
        entry.spoiled += u64::from(sale.units_spoiled);
        entry.revenue += sale.revenue();
    }
    totals
}

/// Fulfillment figures for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFulfillment {
    pub order_id: ProductionOrderId,
    pub units_produced: u64,
    pub units_sold: u64,
    pub units_spoiled: u64,
    pub units_consumed: u64,
    pub units_remaining: u64,
    pub revenue: Decimal,
    pub production_cost: Decimal,
    pub profitability: Decimal,
    pub status: OrderStatus,
}

impl OrderFulfillment {
    fn from_consumption(order: &ProductionOrder, consumption: Consumption) -> Self {
        let units_produced = order.units_produced();
        let units_consumed = consumption.sold + consumption.spoiled;
        let production_cost = order.production_cost();
        Self {
            order_id: order.id.clone(),
            units_produced,
            units_sold: consumption.sold,
            units_spoiled: consumption.spoiled,
            units_consumed,
            units_remaining: units_produced.saturating_sub(units_consumed),
            revenue: consumption.revenue,
            production_cost,
            profitability: consumption.revenue - production_cost,
            status: if units_consumed < units_produced {
                OrderStatus::Open
            } else {
                OrderStatus::Closed
            },
        }
    }
}

/// Fulfillment of a single order against all sales.
#[must_use]
pub fn fulfillment(order: &ProductionOrder, sales: &[Sale]) -> OrderFulfillment {
    let consumption = consumption_by_order(sales)
        .remove(&order.id)
        .unwrap_or_default();
    OrderFulfillment::from_consumption(order, consumption)
}

/// Open or closed status of a single order.
#[must_use]
pub fn order_status(order: &ProductionOrder, sales: &[Sale]) -> OrderStatus {
    fulfillment(order, sales).status
}

/// Orders that still have units to sell, in the given order.
#[must_use]
pub fn available_orders<'a>(orders: &'a [ProductionOrder], sales: &[Sale]) -> Vec<&'a ProductionOrder> {
    let consumption = consumption_by_order(sales);
    orders
        .iter()
        .filter(|order| {
            let used = consumption.get(&order.id).copied().unwrap_or_default();
            OrderFulfillment::from_consumption(order, used).status.is_open()
        })
        .collect()
}

/// One order with its fulfillment figures and its sales, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOverview<'a> {
    pub order: &'a ProductionOrder,
    pub fulfillment: OrderFulfillment,
    pub sales: Vec<&'a Sale>,
}

/// Fulfillment overview for every order, keeping the given order sequence.
#[must_use]
pub fn overview<'a>(orders: &'a [ProductionOrder], sales: &'a [Sale]) -> Vec<OrderOverview<'a>> {
    let consumption = consumption_by_order(sales);
    orders
        .iter()
        .map(|order| {
            let used = consumption.get(&order.id).copied().unwrap_or_default();
            let mut order_sales: Vec<&Sale> = sales.iter().filter(|s| s.is_for(&order.id)).collect();
            order_sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            OrderOverview {
                order,
                fulfillment: OrderFulfillment::from_consumption(order, used),
                sales: order_sales,
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use hielitos_core::{RecipeId, SaleId};

    use super::*;

    pub(crate) fn order(id: &str, batch_count: u32, units_per_batch: u32) -> ProductionOrder {
        ProductionOrder {
            id: ProductionOrderId::new(id),
            recipe_id: Some(RecipeId::new("r1")),
            recipe_name: Some("Mango".to_string()),
            batch_count,
            units_per_batch,
            ingredients: Vec::new(),
            extra_cost: Decimal::ZERO,
            time_spent_minutes: Decimal::ZERO,
            cost_per_batch: None,
            total_cost: Some(Decimal::from(16)),
            created_at: None,
            photo: None,
        }
    }

    pub(crate) fn sale(order_id: &str, sold: u32, spoiled: u32, price: i64) -> Sale {
        Sale {
            id: SaleId::new(format!("s-{order_id}-{sold}-{spoiled}")),
            order_id: Some(ProductionOrderId::new(order_id)),
            units_sold: sold,
            units_spoiled: spoiled,
            unit_price: Decimal::from(price),
            comment: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_order_without_sales_is_open() {
        let o = order("o1", 2, 10);
        assert_eq!(order_status(&o, &[]), OrderStatus::Open);
    }

    #[test]
    fn test_fully_consumed_order_is_closed() {
        let o = order("o1", 2, 10);
        let sales = vec![sale("o1", 15, 5, 2)];
        let f = fulfillment(&o, &sales);
        assert_eq!(f.units_consumed, 20);
        assert_eq!(f.units_remaining, 0);
        assert_eq!(f.status, OrderStatus::Closed);
    }

    #[test]
    fn test_partially_consumed_order_is_open() {
        let o = order("o1", 2, 10);
        let sales = vec![sale("o1", 10, 0, 2), sale("o2", 50, 0, 2)];
        let f = fulfillment(&o, &sales);
        assert_eq!(f.units_remaining, 10);
        assert_eq!(f.revenue, Decimal::from(20));
        assert_eq!(f.profitability, Decimal::from(4));
        assert!(f.status.is_open());
    }

    #[test]
    fn test_oversold_order_is_closed() {
        let o = order("o1", 1, 10);
        let f = fulfillment(&o, &[sale("o1", 12, 0, 1)]);
        assert_eq!(f.units_remaining, 0);
        assert_eq!(f.status, OrderStatus::Closed);
    }

    #[test]
    fn test_zero_batch_order_is_closed() {
        let o = order("o1", 0, 15);
        assert_eq!(order_status(&o, &[]), OrderStatus::Closed);
    }

    #[test]
    fn test_available_orders_filters_closed() {
        let orders = vec![order("o1", 2, 10), order("o2", 1, 10)];
        let sales = vec![sale("o1", 15, 5, 2), sale("o2", 3, 0, 2)];
        let ids: Vec<_> = available_orders(&orders, &sales)
            .into_iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["o2"]);
    }

    #[test]
    fn test_dangling_sales_are_ignored() {
        let orders = vec![order("o1", 1, 10)];
        let mut orphan = sale("gone", 100, 0, 2);
        orphan.order_id = None;
        let sales = vec![orphan, sale("gone", 100, 0, 2)];
        assert_eq!(available_orders(&orders, &sales).len(), 1);
    }

    #[test]
    fn test_overview_groups_sales() {
        let orders = vec![order("o1", 2, 10), order("o2", 1, 10)];
        let sales = vec![sale("o1", 4, 0, 2), sale("o2", 1, 0, 2), sale("o1", 6, 1, 2)];
        let rows = overview(&orders, &sales);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sales.len(), 2);
        assert_eq!(rows[0].fulfillment.units_sold, 10);
        assert_eq!(rows[0].fulfillment.units_spoiled, 1);
        assert_eq!(rows[1].sales.len(), 1);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let orders = vec![order("o1", 2, 10)];
        let sales = vec![sale("o1", 3, 0, 2)];
        assert_eq!(
            fulfillment(&orders[0], &sales),
            fulfillment(&orders[0], &sales)
        );
    }
}
