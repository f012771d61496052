//! Loads the four collections for read views.

use tracing::{debug, instrument, warn};

use super::ServiceError;
use crate::db::{CashMovementRepository, ProductionOrderRepository, RecipeRepository, SaleRepository, Store};
use crate::ledger::LedgerSnapshot;

/// Builds [`LedgerSnapshot`]s from the store.
pub struct LedgerService<'a> {
    store: &'a Store,
}

impl<'a> LedgerService<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Fetch every collection in full.
    ///
    /// Orders are newest first. A failure to read cash movements is logged
    /// and leaves them unset instead of failing the whole view.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if recipes, orders or sales cannot
    /// be read.
    #[instrument(skip(self), fields(backend = self.store.backend()))]
    pub async fn snapshot(&self) -> Result<LedgerSnapshot, ServiceError> {
        let recipes = RecipeRepository::new(self.store).list().await?;
        let orders = ProductionOrderRepository::new(self.store)
            .list_newest_first()
            .await?;
        let sales = SaleRepository::new(self.store).list().await?;
        let cash_movements = match CashMovementRepository::new(self.store).list().await {
            Ok(movements) => Some(movements),
            Err(e) => {
                warn!(error = %e, "Cash movements unavailable, treating as empty");
                None
            }
        };

        debug!(
            recipes = recipes.len(),
            orders = orders.len(),
            sales = sales.len(),
            "Loaded ledger snapshot"
        );
        Ok(LedgerSnapshot {
            recipes,
            orders,
            sales,
            cash_movements,
        })
    }
}
