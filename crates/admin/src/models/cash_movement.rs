//! Cash movement domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hielitos_core::numeric::lenient;
use hielitos_core::{CashMovementId, CashMovementKind};

/// Money moving in or out of the business outside of production and sales.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashMovement {
    pub id: CashMovementId,
    pub amount: Decimal,
    pub kind: CashMovementKind,
    pub comment: String,
    /// Who recorded the movement.
    pub user: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// A validated movement ready to be stored.
#[derive(Debug, Clone)]
pub struct NewCashMovement {
    pub amount: Decimal,
    pub kind: CashMovementKind,
    pub comment: String,
    pub user: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for recording a cash movement.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCashMovementInput {
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub kind: Option<CashMovementKind>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub user: String,
}
