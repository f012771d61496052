//! Write paths with validation, and the snapshot loader for read views.
//!
//! Every validation runs before the first store write, so a rejected
//! request leaves no partial state behind.

pub mod cash;
pub mod ledger;
pub mod production;
pub mod recipes;
pub mod sales;

use thiserror::Error;

use hielitos_core::{NumericError, ProductionOrderId, RecipeId};

use crate::db::RepositoryError;

pub use cash::CashService;
pub use ledger::LedgerService;
pub use production::ProductionService;
pub use recipes::RecipeService;
pub use sales::SaleService;

/// Why a write request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("at least one complete ingredient is required")]
    NoValidIngredients,

    #[error("a sale needs at least one sold or spoiled unit")]
    NoUnits,

    #[error("recipe {0} does not exist")]
    UnknownRecipe(RecipeId),

    #[error("production order {0} does not exist")]
    UnknownOrder(ProductionOrderId),

    #[error("production order {0} has no units left")]
    OrderClosed(ProductionOrderId),
}

impl ValidationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn numeric(field: &'static str, err: &NumericError) -> Self {
        Self::invalid(field, err.to_string())
    }
}

/// Errors from service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// Turn a repository miss into a named `NotFound`.
    pub(crate) fn or_not_found(err: RepositoryError, what: impl FnOnce() -> String) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound(what()),
            other => Self::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::Required("name").to_string(), "name is required");
        assert_eq!(
            ValidationError::invalid("batchCount", "must be at least 1").to_string(),
            "batchCount must be at least 1"
        );
        assert_eq!(
            ValidationError::OrderClosed(ProductionOrderId::new("o1")).to_string(),
            "production order o1 has no units left"
        );
    }

    #[test]
    fn test_or_not_found() {
        let err = ServiceError::or_not_found(RepositoryError::NotFound, || "sale s1".to_string());
        assert_eq!(err.to_string(), "sale s1 not found");

        let err = ServiceError::or_not_found(
            RepositoryError::DataCorruption("bad".to_string()),
            || "sale s1".to_string(),
        );
        assert!(matches!(err, ServiceError::Repository(_)));
    }
}
