//! Sale repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use hielitos_core::numeric::lenient;
use hielitos_core::{ProductionOrderId, SaleId, SortDirection};

use super::store::{Collection, Document, Store};
use super::{RepositoryError, decode_all, encode};
use crate::models::{NewSale, Sale};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaleDocument {
    #[serde(default)]
    order_id: Option<ProductionOrderId>,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    units_sold: u32,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    units_spoiled: u32,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient::decimal_or_zero"
    )]
    unit_price: Decimal,
    #[serde(default)]
    comment: Option<String>,
    #[serde(
        default,
        with = "hielitos_core::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    created_at: Option<DateTime<Utc>>,
}

impl From<&NewSale> for SaleDocument {
    fn from(sale: &NewSale) -> Self {
        Self {
            order_id: Some(sale.order_id.clone()),
            units_sold: sale.units_sold,
            units_spoiled: sale.units_spoiled,
            unit_price: sale.unit_price,
            comment: Some(sale.comment.clone()),
            created_at: Some(sale.created_at),
        }
    }
}

impl SaleDocument {
    fn into_model(self, id: String) -> Sale {
        Sale {
            id: SaleId::new(id),
            order_id: self.order_id,
            units_sold: self.units_sold,
            units_spoiled: self.units_spoiled,
            unit_price: self.unit_price,
            comment: self.comment.unwrap_or_default(),
            created_at: self.created_at,
        }
    }
}

/// Repository for sale documents.
pub struct SaleRepository<'a> {
    store: &'a Store,
}

impl<'a> SaleRepository<'a> {
    /// Create a new sale repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Store a new sale.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store write fails.
    pub async fn create(&self, sale: &NewSale) -> Result<Sale, RepositoryError> {
        let document = SaleDocument::from(sale);
        let id = self.store.insert(Collection::Sales, encode(&document)?).await?;
        Ok(document.into_model(id))
    }

    /// List all sales in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store read fails.
    pub async fn list(&self) -> Result<Vec<Sale>, RepositoryError> {
        let documents = self.store.get_all(Collection::Sales).await?;
        Ok(Self::into_models(documents))
    }

    /// List all sales, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store read fails.
    pub async fn list_newest_first(&self) -> Result<Vec<Sale>, RepositoryError> {
        let documents = self
            .store
            .get_all_ordered(Collection::Sales, "createdAt", SortDirection::Desc)
            .await?;
        Ok(Self::into_models(documents))
    }

    /// Sales drawn from one order, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store read fails.
    pub async fn list_for_order(&self, order_id: &ProductionOrderId) -> Result<Vec<Sale>, RepositoryError> {
        let documents = self
            .store
            .get_where(Collection::Sales, "orderId", &Value::from(order_id.as_str()))
            .await?;
        let mut sales = Self::into_models(documents);
        // Stable, so sales without a timestamp keep insertion order at the end
        sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sales)
    }

    /// Delete a sale.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such sale exists.
    pub async fn delete(&self, id: &SaleId) -> Result<(), RepositoryError> {
        if self.store.delete(Collection::Sales, id.as_str()).await? {
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn into_models(documents: Vec<Document>) -> Vec<Sale> {
        decode_all::<SaleDocument>(Collection::Sales, documents)
            .into_iter()
            .map(|(id, doc)| doc.into_model(id))
            .collect()
    }
}
