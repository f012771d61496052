//! Cash movement service.

use chrono::Utc;
use tracing::{info, instrument};

use hielitos_core::CashMovementId;
use hielitos_core::numeric::storable_amount;

use super::{ServiceError, ValidationError};
use crate::db::{CashMovementRepository, Store};
use crate::models::{CashMovement, NewCashMovement, RecordCashMovementInput};

/// Record, list and delete cash movements.
pub struct CashService<'a> {
    store: &'a Store,
}

impl<'a> CashService<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Record a movement. The kind defaults to expense.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if the user is blank or the amount
    /// is missing, zero or too large to store.
    #[instrument(skip(self, input), fields(kind = ?input.kind))]
    pub async fn record(&self, input: RecordCashMovementInput) -> Result<CashMovement, ServiceError> {
        let user = input.user.trim();
        if user.is_empty() {
            return Err(ValidationError::Required("user").into());
        }
        let amount = input
            .amount
            .filter(|amount| !amount.is_zero())
            .ok_or_else(|| ValidationError::invalid("amount", "must be a non-zero number"))?;
        let amount = storable_amount(amount).map_err(|e| ValidationError::numeric("amount", &e))?;

        let movement = NewCashMovement {
            amount,
            kind: input.kind.unwrap_or_default(),
            comment: input.comment.trim().to_string(),
            user: user.to_string(),
            created_at: Utc::now(),
        };
        let created = CashMovementRepository::new(self.store).create(&movement).await?;
        info!(movement_id = %created.id, kind = %created.kind, amount = %created.amount, "Recorded cash movement");
        Ok(created)
    }

    /// All movements, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store read fails.
    pub async fn list(&self) -> Result<Vec<CashMovement>, ServiceError> {
        Ok(CashMovementRepository::new(self.store)
            .list_newest_first()
            .await?)
    }

    /// Delete a movement.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the movement does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &CashMovementId) -> Result<(), ServiceError> {
        CashMovementRepository::new(self.store)
            .delete(id)
            .await
            .map_err(|e| ServiceError::or_not_found(e, || format!("cash movement {id}")))?;
        info!(movement_id = %id, "Deleted cash movement");
        Ok(())
    }
}
