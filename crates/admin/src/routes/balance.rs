//! Ledger views: balances and recipe ranking.
//!
//! Every request reloads the four collections and recomputes from scratch.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use hielitos_core::PeriodGranularity;

use crate::error::AppError;
use crate::ledger::{BalanceSeries, OverallBalance, RecipeRevenue};
use crate::services::LedgerService;
use crate::state::AppState;

/// Build the ledger router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/balance", get(overall))
        .route("/api/balance/series", get(series))
        .route("/api/bi/top-recipes", get(top_recipes))
}

/// Query parameters for the period series.
#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    /// `day`, `week`, `month` or `year`. Defaults to month.
    pub period: Option<String>,
}

/// Overall balance across all time.
#[instrument(skip(state))]
pub async fn overall(State(state): State<AppState>) -> Result<Json<OverallBalance>, AppError> {
    let snapshot = LedgerService::new(state.store()).snapshot().await?;
    Ok(Json(snapshot.overall_balance()))
}

/// Per-period totals with running balance.
#[instrument(skip(state))]
pub async fn series(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<BalanceSeries>, AppError> {
    let granularity = query
        .period
        .as_deref()
        .map(str::parse::<PeriodGranularity>)
        .transpose()
        .map_err(AppError::BadRequest)?
        .unwrap_or_default();
    let snapshot = LedgerService::new(state.store()).snapshot().await?;
    Ok(Json(snapshot.balance_series(granularity)))
}

/// Top recipes by revenue.
#[instrument(skip(state))]
pub async fn top_recipes(State(state): State<AppState>) -> Result<Json<Vec<RecipeRevenue>>, AppError> {
    let snapshot = LedgerService::new(state.store()).snapshot().await?;
    Ok(Json(snapshot.top_recipes()))
}
