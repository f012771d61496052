//! Production order repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use hielitos_core::numeric::{default_units_per_batch, lenient};
use hielitos_core::{ProductionOrderId, RecipeId, SortDirection};

use super::recipes::IngredientDocument;
use super::store::{Collection, Document, Store};
use super::{RepositoryError, decode, decode_all, encode};
use crate::models::{Ingredient, NewProductionOrder, ProductionOrder};

// =============================================================================
// Stored Document Type
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductionOrderDocument {
    #[serde(default)]
    recipe_id: Option<RecipeId>,
    #[serde(default)]
    recipe_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    batch_count: u32,
    #[serde(
        default = "default_units_per_batch",
        deserialize_with = "lenient::units_per_batch"
    )]
    units_per_batch: u32,
    #[serde(default)]
    ingredients: Vec<IngredientDocument>,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient::decimal_or_zero"
    )]
    extra_cost: Decimal,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient::decimal_or_zero"
    )]
    time_spent_minutes: Decimal,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "lenient::number_only",
        skip_serializing_if = "Option::is_none"
    )]
    cost_per_batch: Option<Decimal>,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "lenient::number_only",
        skip_serializing_if = "Option::is_none"
    )]
    total_cost: Option<Decimal>,
    #[serde(
        default,
        with = "hielitos_core::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
}

impl From<&NewProductionOrder> for ProductionOrderDocument {
    fn from(order: &NewProductionOrder) -> Self {
        Self {
            recipe_id: Some(order.recipe_id.clone()),
            recipe_name: Some(order.recipe_name.clone()),
            batch_count: order.batch_count,
            units_per_batch: order.units_per_batch,
            ingredients: order.ingredients.iter().map(IngredientDocument::from).collect(),
            extra_cost: order.extra_cost,
            time_spent_minutes: order.time_spent_minutes,
            cost_per_batch: Some(order.cost_per_batch),
            total_cost: Some(order.total_cost),
            created_at: Some(order.created_at),
            photo: order.photo.clone(),
        }
    }
}

impl ProductionOrderDocument {
    fn into_model(self, id: String) -> ProductionOrder {
        ProductionOrder {
            id: ProductionOrderId::new(id),
            recipe_id: self.recipe_id,
            recipe_name: self.recipe_name,
            batch_count: self.batch_count,
            units_per_batch: self.units_per_batch,
            ingredients: self.ingredients.into_iter().map(Ingredient::from).collect(),
            extra_cost: self.extra_cost,
            time_spent_minutes: self.time_spent_minutes,
            cost_per_batch: self.cost_per_batch,
            total_cost: self.total_cost,
            created_at: self.created_at,
            photo: self.photo,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for production order documents.
pub struct ProductionOrderRepository<'a> {
    store: &'a Store,
}

impl<'a> ProductionOrderRepository<'a> {
    /// Create a new production order repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Store a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store write fails.
    pub async fn create(&self, order: &NewProductionOrder) -> Result<ProductionOrder, RepositoryError> {
        let document = ProductionOrderDocument::from(order);
        let body = encode(&document)?;
        let id = self.store.insert(Collection::ProductionOrders, body).await?;
        Ok(document.into_model(id))
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the document is unreadable.
    pub async fn get(&self, id: &ProductionOrderId) -> Result<Option<ProductionOrder>, RepositoryError> {
        let Some(document) = self
            .store
            .get(Collection::ProductionOrders, id.as_str())
            .await?
        else {
            return Ok(None);
        };
        let (id, doc) = decode::<ProductionOrderDocument>(document)?;
        Ok(Some(doc.into_model(id)))
    }

    /// List all orders in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store read fails.
    pub async fn list(&self) -> Result<Vec<ProductionOrder>, RepositoryError> {
        let documents = self.store.get_all(Collection::ProductionOrders).await?;
        Ok(Self::into_models(documents))
    }

    /// List all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store read fails.
    pub async fn list_newest_first(&self) -> Result<Vec<ProductionOrder>, RepositoryError> {
        let documents = self
            .store
            .get_all_ordered(Collection::ProductionOrders, "createdAt", SortDirection::Desc)
            .await?;
        Ok(Self::into_models(documents))
    }

    /// Overwrite the batch count and units per batch.
    ///
    /// Stored cost fields are left as they were.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such order exists.
    pub async fn update_batches(
        &self,
        id: &ProductionOrderId,
        batch_count: u32,
        units_per_batch: u32,
    ) -> Result<(), RepositoryError> {
        let mut fields = Map::new();
        fields.insert("batchCount".to_string(), Value::from(batch_count));
        fields.insert("unitsPerBatch".to_string(), Value::from(units_per_batch));
        self.store
            .update(Collection::ProductionOrders, id.as_str(), fields)
            .await?;
        Ok(())
    }

    /// Delete an order. Sales referencing it are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such order exists.
    pub async fn delete(&self, id: &ProductionOrderId) -> Result<(), RepositoryError> {
        if self
            .store
            .delete(Collection::ProductionOrders, id.as_str())
            .await?
        {
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn into_models(documents: Vec<Document>) -> Vec<ProductionOrder> {
        decode_all::<ProductionOrderDocument>(Collection::ProductionOrders, documents)
            .into_iter()
            .map(|(id, doc)| doc.into_model(id))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn new_order(day: u32) -> NewProductionOrder {
        NewProductionOrder {
            recipe_id: RecipeId::new("r1"),
            recipe_name: "Mango".to_string(),
            batch_count: 2,
            units_per_batch: 10,
            ingredients: vec![Ingredient::new(
                "flour",
                Decimal::from(4),
                "kg",
                Decimal::from(3),
            )],
            extra_cost: Decimal::from(4),
            time_spent_minutes: Decimal::from(90),
            cost_per_batch: Decimal::from(8),
            total_cost: Decimal::from(16),
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
            photo: None,
        }
    }

    #[tokio::test]
    async fn test_create_round_trips_costs() {
        let store = Store::memory();
        let repo = ProductionOrderRepository::new(&store);
        let created = repo.create(&new_order(1)).await.unwrap();

        let fetched = repo.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.total_cost, Some(Decimal::from(16)));
        assert_eq!(fetched.cost_per_batch, Some(Decimal::from(8)));
        assert_eq!(fetched.units_produced(), 20);
        assert_eq!(fetched.recipe_name.as_deref(), Some("Mango"));
    }

    #[tokio::test]
    async fn test_legacy_order_defaults() {
        let store = Store::memory();
        store
            .insert(
                Collection::ProductionOrders,
                json!({ "batchCount": "3", "unitsPerBatch": 0, "totalCost": "12" }),
            )
            .await
            .unwrap();

        let orders = ProductionOrderRepository::new(&store).list().await.unwrap();
        assert_eq!(orders[0].batch_count, 3);
        assert_eq!(orders[0].units_per_batch, 15);
        assert_eq!(orders[0].total_cost, None);
        assert!(orders[0].recipe_id.is_none());
        assert!(orders[0].created_at.is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = Store::memory();
        let repo = ProductionOrderRepository::new(&store);
        let older = repo.create(&new_order(1)).await.unwrap();
        let newer = repo.create(&new_order(5)).await.unwrap();

        let ids: Vec<_> = repo
            .list_newest_first()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_update_batches_keeps_costs() {
        let store = Store::memory();
        let repo = ProductionOrderRepository::new(&store);
        let created = repo.create(&new_order(1)).await.unwrap();

        repo.update_batches(&created.id, 5, 12).await.unwrap();
        let fetched = repo.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.batch_count, 5);
        assert_eq!(fetched.units_per_batch, 12);
        assert_eq!(fetched.total_cost, Some(Decimal::from(16)));
    }

    #[tokio::test]
    async fn test_update_missing_order() {
        let store = Store::memory();
        let result = ProductionOrderRepository::new(&store)
            .update_batches(&ProductionOrderId::new("missing"), 1, 1)
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }
}
