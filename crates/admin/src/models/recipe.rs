//! Recipe domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hielitos_core::RecipeId;
use hielitos_core::numeric::lenient;

/// One ingredient line of a recipe or production order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Ingredient name.
    pub name: String,
    /// Quantity in `unit`.
    pub quantity: Decimal,
    /// Free-form unit label (kg, l, pcs).
    pub unit: String,
    /// Price per unit.
    pub unit_price: Decimal,
    /// `quantity * unit_price`, fixed when the line was written.
    pub line_cost: Decimal,
}

impl Ingredient {
    /// Build a line, computing its cost from quantity and price.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        quantity: Decimal,
        unit: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            unit_price,
            line_cost: quantity * unit_price,
        }
    }

    /// Cost recomputed from the current quantity and price.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// A recipe for one batch of product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    /// Embedded image data (usually a `data:image/...` URL).
    pub photo: Option<String>,
}

impl Recipe {
    /// Total cost of one batch, as the sum of stored line costs.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        self.ingredients.iter().map(|i| i.line_cost).sum()
    }
}

/// A validated recipe ready to be stored.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub photo: Option<String>,
}

/// Request body for creating a recipe.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    #[serde(default)]
    pub photo: Option<String>,
}

/// One ingredient row as submitted; incomplete rows are dropped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub unit_price: Option<Decimal>,
}

impl IngredientInput {
    /// Convert to a stored line if the row is complete.
    ///
    /// A row is complete when it has a name and a unit, a positive quantity
    /// and a non-negative price.
    #[must_use]
    pub fn to_ingredient(&self) -> Option<Ingredient> {
        let name = self.name.trim();
        let unit = self.unit.trim();
        if name.is_empty() || unit.is_empty() {
            return None;
        }
        let quantity = self.quantity.filter(|q| *q > Decimal::ZERO)?;
        let unit_price = self.unit_price.filter(|p| *p >= Decimal::ZERO)?;
        Some(Ingredient::new(name, quantity, unit, unit_price))
    }
}
