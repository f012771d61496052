//! Seed the document store from a YAML file.
//!
//! Records go through the same services as the HTTP API, so every row is
//! validated and orders get their cost snapshot. Orders nest under their
//! recipe and sales under their order:
//!
//! ```yaml
//! recipes:
//!   - name: Mango
//!     photo: "data:image/png;base64,..."
//!     ingredients:
//!       - { name: mango, quantity: 2, unit: kg, unitPrice: 3 }
//!     orders:
//!       - batchCount: 2
//!         unitsPerBatch: 10
//!         extraCost: 4
//!         sales:
//!           - { unitsSold: 15, unitsSpoiled: 5, unitPrice: 2 }
//! cashMovements:
//!   - { amount: 50, kind: investment, user: ana }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use hielitos_admin::db::Store;
use hielitos_admin::models::{
    CreateProductionOrderInput, CreateRecipeInput, RecordCashMovementInput, RecordSaleInput,
};
use hielitos_admin::services::{CashService, ProductionService, RecipeService, SaleService, ServiceError};

use super::connect;

/// Top level of a seed file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedFile {
    #[serde(default)]
    pub recipes: Vec<SeedRecipe>,
    #[serde(default)]
    pub cash_movements: Vec<RecordCashMovementInput>,
}

/// A recipe with the orders produced from it.
#[derive(Debug, Deserialize)]
pub struct SeedRecipe {
    #[serde(flatten)]
    pub recipe: CreateRecipeInput,
    #[serde(default)]
    pub orders: Vec<SeedOrder>,
}

/// An order with its sales. `recipeId` and `orderId` are filled in.
#[derive(Debug, Deserialize)]
pub struct SeedOrder {
    #[serde(flatten)]
    pub order: CreateProductionOrderInput,
    #[serde(default)]
    pub sales: Vec<RecordSaleInput>,
}

/// Counts of created records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub recipes: usize,
    pub orders: usize,
    pub sales: usize,
    pub cash_movements: usize,
}

/// Seed the configured database from `file_path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the database is
/// unreachable, or a record fails validation. Records created before the
/// failing one are kept.
pub async fn run(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading seed file");

    // Parse before connecting so a bad file never touches the database
    let content = tokio::fs::read_to_string(path).await?;
    let seed: SeedFile = serde_yaml::from_str(&content)?;
    info!(recipes = seed.recipes.len(), cash_movements = seed.cash_movements.len(), "Parsed seed file");

    let store = connect().await?;
    let summary = seed_store(&store, seed).await?;

    info!("Seeding complete!");
    info!("  Recipes: {}", summary.recipes);
    info!("  Production orders: {}", summary.orders);
    info!("  Sales: {}", summary.sales);
    info!("  Cash movements: {}", summary.cash_movements);
    Ok(())
}

/// Create every record of `seed` in `store`.
///
/// # Errors
///
/// Returns the first service error; earlier records stay created.
pub async fn seed_store(store: &Store, seed: SeedFile) -> Result<SeedSummary, ServiceError> {
    let mut summary = SeedSummary::default();

    for SeedRecipe { recipe, orders } in seed.recipes {
        let recipe = RecipeService::new(store).create(recipe).await?;
        summary.recipes += 1;

        for SeedOrder { mut order, sales } in orders {
            order.recipe_id = Some(recipe.id.clone());
            let order = ProductionService::new(store).create(order).await?;
            summary.orders += 1;

            for mut sale in sales {
                sale.order_id = Some(order.id.clone());
                SaleService::new(store).record(sale).await?;
                summary.sales += 1;
            }
        }
    }

    for movement in seed.cash_movements {
        CashService::new(store).record(movement).await?;
        summary.cash_movements += 1;
    }

    Ok(summary)
}
