//! Production order report.

use rust_decimal::Decimal;

use super::{
    EmbeddedImage, PLACEHOLDER, ReportContext, ReportDocument, ReportField, ReportTable, footer,
    money, number, timestamp,
};
use crate::models::{Ingredient, ProductionOrder, Recipe};

/// Build the production order report.
///
/// Costs are recomputed from the stored ingredient lines: cost per batch is
/// the ingredient cost divided by the batch count, and total cost adds the
/// extra cost. The photo is the order's, falling back to the recipe's.
#[must_use]
pub fn production_order_report(
    order: &ProductionOrder,
    recipe: Option<&Recipe>,
    context: &ReportContext,
) -> ReportDocument {
    let ingredient_cost: Decimal = order.ingredients.iter().map(Ingredient::cost).sum();
    let cost_per_batch = ingredient_cost / Decimal::from(order.batch_count.max(1));
    let recipe_name = order
        .snapshot_name()
        .or_else(|| recipe.map(|r| r.name.as_str()).filter(|n| !n.is_empty()))
        .unwrap_or(PLACEHOLDER);

    let fields = vec![
        ReportField::new("Order No.", order.id.as_str()),
        ReportField::new("User", context.user.as_str()),
        ReportField::new("Date", timestamp(order.created_at)),
        ReportField::new("Recipe", recipe_name),
        ReportField::new("Batches", order.batch_count.to_string()),
        ReportField::new("Cost per batch", money(cost_per_batch)),
        ReportField::new("Total cost", money(ingredient_cost + order.extra_cost)),
        ReportField::new("Extra cost", money(order.extra_cost)),
        ReportField::new("Time spent", format!("{} min", number(order.time_spent_minutes))),
    ];

    let mut body = ReportTable::new(&["Ingredient", "Quantity", "Unit", "Unit price", "Line cost"])
        .with_heading("Ingredients")
        .with_empty_message("No ingredients recorded.");
    for ingredient in &order.ingredients {
        body.push_row(vec![
            ingredient.name.clone(),
            number(ingredient.quantity),
            ingredient.unit.clone(),
            money(ingredient.unit_price),
            money(ingredient.cost()),
        ]);
    }

    let image = EmbeddedImage::first_of([
        order.photo.as_deref(),
        recipe.and_then(|r| r.photo.as_deref()),
    ]);

    ReportDocument {
        title: "PRODUCTION ORDER".to_string(),
        brand: context.brand.clone(),
        fields,
        header: None,
        image_caption: image.as_ref().map(|_| "Product photo".to_string()),
        image,
        body,
        summary: None,
        footer: footer(&context.brand),
    }
}
