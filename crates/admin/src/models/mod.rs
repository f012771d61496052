//! Domain models for the ledger.
//!
//! Each model mirrors one document collection. Write inputs (`Create*`,
//! `Record*`) are deserialized from request bodies with the lenient numeric
//! rules from [`hielitos_core::numeric`]; the `New*` types are validated
//! records ready to be persisted.

pub mod cash_movement;
pub mod production_order;
pub mod recipe;
pub mod sale;

pub use cash_movement::{CashMovement, NewCashMovement, RecordCashMovementInput};
pub use production_order::{
    CreateProductionOrderInput, NewProductionOrder, PriceOverride, ProductionOrder,
    UpdateBatchesInput,
};
pub use recipe::{CreateRecipeInput, Ingredient, IngredientInput, NewRecipe, Recipe};
pub use sale::{NewSale, RecordSaleInput, Sale};
