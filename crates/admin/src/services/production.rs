//! Production order service: cost snapshots and batch edits.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use hielitos_core::numeric::non_negative_amount;
use hielitos_core::{DEFAULT_UNITS_PER_BATCH, ProductionOrderId};

use super::{ServiceError, ValidationError};
use crate::db::{ProductionOrderRepository, RecipeRepository, Store};
use crate::ledger::{apply_price_overrides, compute_costs, scale_ingredients};
use crate::models::{
    CreateProductionOrderInput, NewProductionOrder, ProductionOrder, UpdateBatchesInput,
};

/// Create, edit, list and delete production orders.
pub struct ProductionService<'a> {
    store: &'a Store,
}

fn batch_count(value: Option<u32>) -> Result<u32, ValidationError> {
    value
        .filter(|&count| count >= 1)
        .ok_or_else(|| ValidationError::invalid("batchCount", "must be a whole number of at least 1"))
}

fn units_per_batch(value: Option<u32>) -> u32 {
    value.filter(|&units| units > 0).unwrap_or(DEFAULT_UNITS_PER_BATCH)
}

fn non_negative(field: &'static str, value: Option<Decimal>) -> Result<Decimal, ValidationError> {
    non_negative_amount(value.unwrap_or_default()).map_err(|e| ValidationError::numeric(field, &e))
}

impl<'a> ProductionService<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create an order from a recipe, snapshotting its name, photo, prices
    /// and computed costs.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for a missing or unknown recipe, a
    /// batch count below one, negative amounts or out-of-range price
    /// overrides.
    #[instrument(skip(self, input), fields(recipe_id = ?input.recipe_id))]
    pub async fn create(&self, input: CreateProductionOrderInput) -> Result<ProductionOrder, ServiceError> {
        let recipe_id = input.recipe_id.ok_or(ValidationError::Required("recipeId"))?;
        let batch_count = batch_count(input.batch_count)?;
        let units_per_batch = units_per_batch(input.units_per_batch);
        let extra_cost = non_negative("extraCost", input.extra_cost)?;
        let time_spent_minutes = non_negative("timeSpentMinutes", input.time_spent_minutes)?;
        for price in &input.price_overrides {
            non_negative_amount(price.unit_price).map_err(|e| ValidationError::numeric("priceOverrides", &e))?;
        }

        let recipe = RecipeRepository::new(self.store)
            .get(&recipe_id)
            .await?
            .ok_or_else(|| ValidationError::UnknownRecipe(recipe_id.clone()))?;

        let priced = apply_price_overrides(&recipe.ingredients, &input.price_overrides).map_err(|index| {
            ValidationError::invalid("priceOverrides", format!("has no ingredient at position {index}"))
        })?;
        let costs = compute_costs(&priced, batch_count, extra_cost);

        let order = NewProductionOrder {
            recipe_id: recipe.id,
            recipe_name: recipe.name,
            batch_count,
            units_per_batch,
            ingredients: scale_ingredients(&priced, batch_count),
            extra_cost,
            time_spent_minutes,
            cost_per_batch: costs.cost_per_batch,
            total_cost: costs.total_cost,
            created_at: Utc::now(),
            photo: recipe.photo,
        };
        let created = ProductionOrderRepository::new(self.store).create(&order).await?;
        info!(
            order_id = %created.id,
            batch_count,
            total_cost = %costs.total_cost,
            "Created production order"
        );
        Ok(created)
    }

    /// Edit batch count and units per batch. Cost snapshots are not
    /// recomputed.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for a batch count below one and
    /// `ServiceError::NotFound` if the order does not exist.
    #[instrument(skip(self, input))]
    pub async fn update_batches(
        &self,
        id: &ProductionOrderId,
        input: UpdateBatchesInput,
    ) -> Result<ProductionOrder, ServiceError> {
        let batch_count = batch_count(input.batch_count)?;
        let units_per_batch = units_per_batch(input.units_per_batch);
        let repo = ProductionOrderRepository::new(self.store);
        let not_found = || format!("production order {id}");

        repo.update_batches(id, batch_count, units_per_batch)
            .await
            .map_err(|e| ServiceError::or_not_found(e, not_found))?;
        info!(order_id = %id, batch_count, units_per_batch, "Updated production order batches");

        repo.get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(not_found()))
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the order does not exist.
    pub async fn get(&self, id: &ProductionOrderId) -> Result<ProductionOrder, ServiceError> {
        ProductionOrderRepository::new(self.store)
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("production order {id}")))
    }

    /// All orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store read fails.
    pub async fn list(&self) -> Result<Vec<ProductionOrder>, ServiceError> {
        Ok(ProductionOrderRepository::new(self.store)
            .list_newest_first()
            .await?)
    }

    /// Delete an order. Its sales are kept and become dangling.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the order does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ProductionOrderId) -> Result<(), ServiceError> {
        ProductionOrderRepository::new(self.store)
            .delete(id)
            .await
            .map_err(|e| ServiceError::or_not_found(e, || format!("production order {id}")))?;
        info!(order_id = %id, "Deleted production order");
        Ok(())
    }
}
