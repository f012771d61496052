//! Production order (batch run) domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hielitos_core::numeric::lenient;
use hielitos_core::{ProductionOrderId, RecipeId};

use super::recipe::Ingredient;

/// Placeholder shown when neither a snapshot nor a live recipe name exists.
pub const UNNAMED: &str = "Unnamed";

/// A production run of some number of batches of one recipe.
///
/// `recipe_name` and `photo` are snapshots taken at creation; later edits to
/// the recipe do not change them. The cost fields are snapshots too and are
/// not recomputed when the batch count is edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionOrder {
    pub id: ProductionOrderId,
    /// Soft reference; the recipe may have been deleted since.
    pub recipe_id: Option<RecipeId>,
    pub recipe_name: Option<String>,
    pub batch_count: u32,
    pub units_per_batch: u32,
    /// Recipe ingredients scaled by the batch count.
    pub ingredients: Vec<Ingredient>,
    pub extra_cost: Decimal,
    pub time_spent_minutes: Decimal,
    pub cost_per_batch: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub created_at: Option<DateTime<Utc>>,
    pub photo: Option<String>,
}

impl ProductionOrder {
    /// Units this order produced.
    #[must_use]
    pub fn units_produced(&self) -> u64 {
        u64::from(self.batch_count) * u64::from(self.units_per_batch)
    }

    /// Stored total cost, or zero when the order predates cost snapshots.
    #[must_use]
    pub fn production_cost(&self) -> Decimal {
        self.total_cost.unwrap_or_default()
    }

    /// Amount this order contributes to expenses.
    ///
    /// Uses the stored total when present, otherwise rebuilds it from the
    /// stored ingredient lines and the extra cost.
    #[must_use]
    pub fn expense(&self) -> Decimal {
        self.total_cost.unwrap_or_else(|| {
            self.ingredients.iter().map(Ingredient::cost).sum::<Decimal>() + self.extra_cost
        })
    }

    /// Snapshot recipe name, if it is non-empty.
    #[must_use]
    pub fn snapshot_name(&self) -> Option<&str> {
        self.recipe_name.as_deref().filter(|name| !name.trim().is_empty())
    }
}

/// A validated order ready to be stored.
#[derive(Debug, Clone)]
pub struct NewProductionOrder {
    pub recipe_id: RecipeId,
    pub recipe_name: String,
    pub batch_count: u32,
    pub units_per_batch: u32,
    pub ingredients: Vec<Ingredient>,
    pub extra_cost: Decimal,
    pub time_spent_minutes: Decimal,
    pub cost_per_batch: Decimal,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub photo: Option<String>,
}

/// Unit price override for the ingredient at `index` in the recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceOverride {
    pub index: usize,
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub unit_price: Decimal,
}

/// Request body for creating a production order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductionOrderInput {
    #[serde(default)]
    pub recipe_id: Option<RecipeId>,
    #[serde(default, deserialize_with = "lenient::optional_count")]
    pub batch_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional_count")]
    pub units_per_batch: Option<u32>,
    #[serde(default)]
    pub price_overrides: Vec<PriceOverride>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub extra_cost: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub time_spent_minutes: Option<Decimal>,
}

/// Request body for editing an order's batch figures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBatchesInput {
    #[serde(default, deserialize_with = "lenient::optional_count")]
    pub batch_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient::optional_count")]
    pub units_per_batch: Option<u32>,
}
