//! Sale domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hielitos_core::numeric::lenient;
use hielitos_core::{ProductionOrderId, SaleId};

/// Units sold or spoiled out of one production order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: SaleId,
    /// Order the units came from. May dangle if the order was deleted.
    pub order_id: Option<ProductionOrderId>,
    pub units_sold: u32,
    pub units_spoiled: u32,
    pub unit_price: Decimal,
    pub comment: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Sale {
    /// Income from this sale.
    #[must_use]
    pub fn revenue(&self) -> Decimal {
        Decimal::from(self.units_sold) * self.unit_price
    }

    /// Units taken out of the order, sold or spoiled.
    #[must_use]
    pub fn units_consumed(&self) -> u64 {
        u64::from(self.units_sold) + u64::from(self.units_spoiled)
    }

    /// Returns `true` if this sale draws from `order_id`.
    #[must_use]
    pub fn is_for(&self, order_id: &ProductionOrderId) -> bool {
        self.order_id.as_ref() == Some(order_id)
    }
}

/// A validated sale ready to be stored.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub order_id: ProductionOrderId,
    pub units_sold: u32,
    pub units_spoiled: u32,
    pub unit_price: Decimal,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for recording a sale.
///
/// Missing or unparseable counts and prices read as zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSaleInput {
    #[serde(default)]
    pub order_id: Option<ProductionOrderId>,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub units_sold: u32,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub units_spoiled: u32,
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub unit_price: Decimal,
    #[serde(default)]
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_ignores_spoiled_units() {
        let sale = Sale {
            id: SaleId::new("s1"),
            order_id: Some(ProductionOrderId::new("o1")),
            units_sold: 10,
            units_spoiled: 3,
            unit_price: Decimal::from(2),
            comment: String::new(),
            created_at: None,
        };
        assert_eq!(sale.revenue(), Decimal::from(20));
        assert_eq!(sale.units_consumed(), 13);
        assert!(sale.is_for(&ProductionOrderId::new("o1")));
        assert!(!sale.is_for(&ProductionOrderId::new("o2")));
    }

    #[test]
    fn test_record_input_defaults() {
        let input: RecordSaleInput = serde_json::from_value(serde_json::json!({
            "orderId": "o1",
            "unitsSold": "",
            "unitsSpoiled": "2",
            "unitPrice": "2.5"
        }))
        .expect("deserialize");
        assert_eq!(input.units_sold, 0);
        assert_eq!(input.units_spoiled, 2);
        assert_eq!(input.unit_price, Decimal::new(25, 1));
        assert!(input.comment.is_empty());
    }
}
