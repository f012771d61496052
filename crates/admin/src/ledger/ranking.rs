//! Top-selling recipes by revenue.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use hielitos_core::{ProductionOrderId, RecipeId};

use crate::models::production_order::UNNAMED;
use crate::models::{ProductionOrder, Recipe, Sale};

/// Number of entries in the top-recipes ranking.
pub const TOP_RECIPES_LIMIT: usize = 10;

/// Revenue attributed to one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRevenue {
    pub recipe_id: RecipeId,
    pub name: String,
    pub revenue: Decimal,
    pub units_sold: u64,
}

/// Rank recipes by sales revenue, highest first.
///
/// Each sale is attributed to the recipe of its order. Sales whose order is
/// missing or has no recipe are skipped. The name comes from the first
/// contributing order's snapshot, then the live recipe, then `"Unnamed"`.
/// Ties keep the order in which recipes were first seen.
#[must_use]
pub fn top_recipes(
    recipes: &[Recipe],
    orders: &[ProductionOrder],
    sales: &[Sale],
    limit: usize,
) -> Vec<RecipeRevenue> {
    let orders_by_id: HashMap<&ProductionOrderId, &ProductionOrder> =
        orders.iter().map(|o| (&o.id, o)).collect();
    let recipe_names: HashMap<&RecipeId, &str> = recipes
        .iter()
        .map(|r| (&r.id, r.name.as_str()))
        .collect();

    let mut ranking: Vec<RecipeRevenue> = Vec::new();
    let mut positions: HashMap<RecipeId, usize> = HashMap::new();

    for sale in sales {
        let Some(order) = sale.order_id.as_ref().and_then(|id| orders_by_id.get(id)) else {
            continue;
        };
        let Some(recipe_id) = order.recipe_id.as_ref() else {
            continue;
        };
        let position = *positions.entry(recipe_id.clone()).or_insert_with(|| {
            let name = order
                .snapshot_name()
                .or_else(|| recipe_names.get(recipe_id).copied().filter(|n| !n.is_empty()))
                .unwrap_or(UNNAMED);
            ranking.push(RecipeRevenue {
                recipe_id: recipe_id.clone(),
                name: name.to_string(),
                revenue: Decimal::ZERO,
                units_sold: 0,
            });
            ranking.len() - 1
        });
        if let Some(entry) = ranking.get_mut(position) {
            entry.revenue += sale.revenue();
            entry.units_sold += u64::from(sale.units_sold);
        }
    }

    // sort_by is stable: equal revenue keeps first-seen order
    ranking.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    ranking.truncate(limit);
    ranking
}
