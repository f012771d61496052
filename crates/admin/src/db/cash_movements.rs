//! Cash movement repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hielitos_core::numeric::lenient;
use hielitos_core::{CashMovementId, SortDirection};

use super::store::{Collection, Document, Store};
use super::{RepositoryError, decode_all, encode};
use crate::models::{CashMovement, NewCashMovement};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CashMovementDocument {
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient::decimal_or_zero"
    )]
    amount: Decimal,
    /// Unknown kinds read as expenses.
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    user: Option<String>,
    #[serde(
        default,
        with = "hielitos_core::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    created_at: Option<DateTime<Utc>>,
}

impl From<&NewCashMovement> for CashMovementDocument {
    fn from(movement: &NewCashMovement) -> Self {
        Self {
            amount: movement.amount,
            kind: Some(movement.kind.to_string()),
            comment: Some(movement.comment.clone()),
            user: Some(movement.user.clone()),
            created_at: Some(movement.created_at),
        }
    }
}

impl CashMovementDocument {
    fn into_model(self, id: String) -> CashMovement {
        CashMovement {
            id: CashMovementId::new(id),
            amount: self.amount,
            kind: self
                .kind
                .and_then(|kind| kind.parse().ok())
                .unwrap_or_default(),
            comment: self.comment.unwrap_or_default(),
            user: self.user.unwrap_or_default(),
            created_at: self.created_at,
        }
    }
}

/// Repository for cash movement documents.
pub struct CashMovementRepository<'a> {
    store: &'a Store,
}

impl<'a> CashMovementRepository<'a> {
    /// Create a new cash movement repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Store a new movement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store write fails.
    pub async fn create(&self, movement: &NewCashMovement) -> Result<CashMovement, RepositoryError> {
        let document = CashMovementDocument::from(movement);
        let id = self
            .store
            .insert(Collection::CashMovements, encode(&document)?)
            .await?;
        Ok(document.into_model(id))
    }

    /// List all movements in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store read fails.
    pub async fn list(&self) -> Result<Vec<CashMovement>, RepositoryError> {
        let documents = self.store.get_all(Collection::CashMovements).await?;
        Ok(Self::into_models(documents))
    }

    /// List all movements, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store read fails.
    pub async fn list_newest_first(&self) -> Result<Vec<CashMovement>, RepositoryError> {
        let documents = self
            .store
            .get_all_ordered(Collection::CashMovements, "createdAt", SortDirection::Desc)
            .await?;
        Ok(Self::into_models(documents))
    }

    /// Delete a movement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such movement exists.
    pub async fn delete(&self, id: &CashMovementId) -> Result<(), RepositoryError> {
        if self.store.delete(Collection::CashMovements, id.as_str()).await? {
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn into_models(documents: Vec<Document>) -> Vec<CashMovement> {
        decode_all::<CashMovementDocument>(Collection::CashMovements, documents)
            .into_iter()
            .map(|(id, doc)| doc.into_model(id))
            .collect()
    }
}
