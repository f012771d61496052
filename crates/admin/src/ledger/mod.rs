//! Ledger aggregation over fully loaded collections.
//!
//! Everything here is a pure function of its inputs: no store access, no
//! caching. Callers load a [`LedgerSnapshot`] and recompute derived views
//! on every request.

pub mod balance;
pub mod costing;
pub mod fulfillment;
pub mod period;
pub mod ranking;

use hielitos_core::PeriodGranularity;

pub use balance::{BalanceSeries, OverallBalance, PeriodTotals, balance_series, overall_balance};
pub use costing::{CostBreakdown, apply_price_overrides, compute_costs, scale_ingredients};
pub use fulfillment::{OrderFulfillment, OrderOverview, available_orders, fulfillment, order_status, overview};
pub use period::{period_key, week_number};
pub use ranking::{RecipeRevenue, TOP_RECIPES_LIMIT, top_recipes};

use crate::models::{CashMovement, ProductionOrder, Recipe, Sale};

/// The four collections, loaded in full.
///
/// `cash_movements` is `None` when that collection could not be loaded;
/// aggregates treat it as empty.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub recipes: Vec<Recipe>,
    pub orders: Vec<ProductionOrder>,
    pub sales: Vec<Sale>,
    pub cash_movements: Option<Vec<CashMovement>>,
}

impl LedgerSnapshot {
    /// Cash movements, or an empty slice if they were not loaded.
    #[must_use]
    pub fn cash_movements(&self) -> &[CashMovement] {
        self.cash_movements.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn balance_series(&self, granularity: PeriodGranularity) -> BalanceSeries {
        balance_series(&self.sales, &self.orders, self.cash_movements(), granularity)
    }

    #[must_use]
    pub fn overall_balance(&self) -> OverallBalance {
        overall_balance(&self.sales, &self.orders, self.cash_movements())
    }

    #[must_use]
    pub fn top_recipes(&self) -> Vec<RecipeRevenue> {
        top_recipes(&self.recipes, &self.orders, &self.sales, TOP_RECIPES_LIMIT)
    }

    #[must_use]
    pub fn available_orders(&self) -> Vec<&ProductionOrder> {
        available_orders(&self.orders, &self.sales)
    }

    #[must_use]
    pub fn overview(&self) -> Vec<OrderOverview<'_>> {
        overview(&self.orders, &self.sales)
    }
}
