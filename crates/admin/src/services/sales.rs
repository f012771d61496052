//! Sale service.

use chrono::Utc;
use tracing::{info, instrument, warn};

use hielitos_core::numeric::non_negative_amount;
use hielitos_core::{ProductionOrderId, SaleId};

use super::{ServiceError, ValidationError};
use crate::db::{ProductionOrderRepository, SaleRepository, Store};
use crate::ledger::order_status;
use crate::models::{NewSale, RecordSaleInput, Sale};

/// Record, list and delete sales.
pub struct SaleService<'a> {
    store: &'a Store,
}

impl<'a> SaleService<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Record a sale against an open order.
    ///
    /// Quantities are not checked against the units remaining; an order
    /// that goes over simply closes.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if no order is given, the order is
    /// unknown or closed, no unit was sold or spoiled, or the price is
    /// negative or too large to store.
    #[instrument(skip(self, input), fields(order_id = ?input.order_id))]
    pub async fn record(&self, input: RecordSaleInput) -> Result<Sale, ServiceError> {
        let order_id = input.order_id.ok_or(ValidationError::Required("orderId"))?;
        if input.units_sold == 0 && input.units_spoiled == 0 {
            return Err(ValidationError::NoUnits.into());
        }
        non_negative_amount(input.unit_price).map_err(|e| ValidationError::numeric("unitPrice", &e))?;

        let order = ProductionOrderRepository::new(self.store)
            .get(&order_id)
            .await?
            .ok_or_else(|| ValidationError::UnknownOrder(order_id.clone()))?;
        let sales = SaleRepository::new(self.store)
            .list_for_order(&order_id)
            .await?;
        if !order_status(&order, &sales).is_open() {
            warn!(order_id = %order_id, "Rejected sale against closed order");
            return Err(ValidationError::OrderClosed(order_id).into());
        }

        let sale = NewSale {
            order_id,
            units_sold: input.units_sold,
            units_spoiled: input.units_spoiled,
            unit_price: input.unit_price,
            comment: input.comment.trim().to_string(),
            created_at: Utc::now(),
        };
        let created = SaleRepository::new(self.store).create(&sale).await?;
        info!(
            sale_id = %created.id,
            units_sold = created.units_sold,
            units_spoiled = created.units_spoiled,
            "Recorded sale"
        );
        Ok(created)
    }

    /// All sales, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store read fails.
    pub async fn list(&self) -> Result<Vec<Sale>, ServiceError> {
        Ok(SaleRepository::new(self.store).list_newest_first().await?)
    }

    /// Sales drawn from one order, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store read fails.
    pub async fn list_for_order(&self, order_id: &ProductionOrderId) -> Result<Vec<Sale>, ServiceError> {
        Ok(SaleRepository::new(self.store).list_for_order(order_id).await?)
    }

    /// Delete a sale, reopening its order if units become available.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the sale does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &SaleId) -> Result<(), ServiceError> {
        SaleRepository::new(self.store)
            .delete(id)
            .await
            .map_err(|e| ServiceError::or_not_found(e, || format!("sale {id}")))?;
        info!(sale_id = %id, "Deleted sale");
        Ok(())
    }
}
