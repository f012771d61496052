//! Batch cost computation at order-creation time.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Ingredient, PriceOverride};

/// Cost figures for a production order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Ingredient cost of a single batch.
    pub cost_per_batch_ingredients: Decimal,
    /// Ingredient cost of all batches.
    pub total_ingredient_cost: Decimal,
    /// Ingredient cost of all batches plus the extra cost.
    pub total_cost: Decimal,
    /// Ingredient cost of one batch plus its share of the extra cost.
    pub cost_per_batch: Decimal,
}

/// Compute order costs from unscaled recipe ingredients.
///
/// `batch_count` must be at least one; zero is treated as one when
/// splitting the extra cost.
#[must_use]
pub fn compute_costs(ingredients: &[Ingredient], batch_count: u32, extra_cost: Decimal) -> CostBreakdown {
    let cost_per_batch_ingredients: Decimal = ingredients.iter().map(Ingredient::cost).sum();
    let batches = Decimal::from(batch_count);
    let total_ingredient_cost = cost_per_batch_ingredients * batches;
    CostBreakdown {
        cost_per_batch_ingredients,
        total_ingredient_cost,
        total_cost: total_ingredient_cost + extra_cost,
        cost_per_batch: cost_per_batch_ingredients + extra_cost / Decimal::from(batch_count.max(1)),
    }
}

/// Replace unit prices by position.
///
/// # Errors
///
/// Returns the offending index if an override points past the last
/// ingredient.
pub fn apply_price_overrides(
    ingredients: &[Ingredient],
    overrides: &[PriceOverride],
) -> Result<Vec<Ingredient>, usize> {
    let mut priced = ingredients.to_vec();
    for price in overrides {
        let ingredient = priced.get_mut(price.index).ok_or(price.index)?;
        ingredient.unit_price = price.unit_price;
        ingredient.line_cost = ingredient.cost();
    }
    Ok(priced)
}

/// Ingredient lines for the whole order: quantities multiplied by the
/// batch count, line costs recomputed.
#[must_use]
pub fn scale_ingredients(ingredients: &[Ingredient], batch_count: u32) -> Vec<Ingredient> {
    let batches = Decimal::from(batch_count);
    ingredients
        .iter()
        .map(|ingredient| {
            Ingredient::new(
                ingredient.name.clone(),
                ingredient.quantity * batches,
                ingredient.unit.clone(),
                ingredient.unit_price,
            )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn flour() -> Vec<Ingredient> {
        vec![Ingredient::new("flour", Decimal::from(2), "kg", Decimal::from(3))]
    }

    #[test]
    fn test_compute_costs() {
        let costs = compute_costs(&flour(), 2, Decimal::from(4));
        assert_eq!(costs.cost_per_batch_ingredients, Decimal::from(6));
        assert_eq!(costs.total_ingredient_cost, Decimal::from(12));
        assert_eq!(costs.total_cost, Decimal::from(16));
        assert_eq!(costs.cost_per_batch, Decimal::from(8));
    }

    #[test]
    fn test_compute_costs_without_ingredients() {
        let costs = compute_costs(&[], 3, Decimal::from(9));
        assert_eq!(costs.total_cost, Decimal::from(9));
        assert_eq!(costs.cost_per_batch, Decimal::from(3));
    }

    #[test]
    fn test_price_overrides() {
        let priced = apply_price_overrides(
            &flour(),
            &[PriceOverride {
                index: 0,
                unit_price: Decimal::from(5),
            }],
        )
        .unwrap();
        assert_eq!(priced[0].unit_price, Decimal::from(5));
        assert_eq!(priced[0].line_cost, Decimal::from(10));

        let missing = apply_price_overrides(
            &flour(),
            &[PriceOverride {
                index: 3,
                unit_price: Decimal::ONE,
            }],
        );
        assert_eq!(missing, Err(3));
    }

    #[test]
    fn test_scale_ingredients() {
        let scaled = scale_ingredients(&flour(), 2);
        assert_eq!(scaled[0].quantity, Decimal::from(4));
        assert_eq!(scaled[0].unit_price, Decimal::from(3));
        assert_eq!(scaled[0].line_cost, Decimal::from(12));
    }
}
