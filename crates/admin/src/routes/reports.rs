//! Printable report handlers.

use axum::{
    Router,
    extract::{Path, State},
    response::Html,
    routing::get,
};
use tracing::instrument;

use hielitos_core::ProductionOrderId;

use crate::error::AppError;
use crate::models::{ProductionOrder, Recipe};
use crate::reports::{self, ReportDocument};
use crate::services::{ProductionService, RecipeService, SaleService};
use crate::state::AppState;

/// Build the reports router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports/orders/{id}", get(production_order))
        .route("/reports/orders/{id}/sales", get(sales_history))
}

/// Production order report.
#[instrument(skip(state))]
pub async fn production_order(
    State(state): State<AppState>,
    Path(id): Path<ProductionOrderId>,
) -> Result<Html<String>, AppError> {
    let (order, recipe) = load_order(&state, &id).await?;
    let report = reports::production_order_report(&order, recipe.as_ref(), &state.report_context());
    render(&report)
}

/// Sales history report of one order.
#[instrument(skip(state))]
pub async fn sales_history(
    State(state): State<AppState>,
    Path(id): Path<ProductionOrderId>,
) -> Result<Html<String>, AppError> {
    let (order, recipe) = load_order(&state, &id).await?;
    let sales = SaleService::new(state.store()).list_for_order(&id).await?;
    let report =
        reports::sales_history_report(&order, &sales, recipe.as_ref(), &state.report_context());
    render(&report)
}

async fn load_order(
    state: &AppState,
    id: &ProductionOrderId,
) -> Result<(ProductionOrder, Option<Recipe>), AppError> {
    let order = ProductionService::new(state.store()).get(id).await?;
    let recipe = match &order.recipe_id {
        Some(recipe_id) => RecipeService::new(state.store()).find(recipe_id).await?,
        None => None,
    };
    Ok((order, recipe))
}

fn render(report: &ReportDocument) -> Result<Html<String>, AppError> {
    reports::render_html(report)
        .map(Html)
        .map_err(|e| AppError::Internal(format!("Template render error: {e}")))
}
