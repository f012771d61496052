//! Sale API handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use tracing::instrument;

use hielitos_core::SaleId;

use crate::error::AppError;
use crate::models::{RecordSaleInput, Sale};
use crate::services::SaleService;
use crate::state::AppState;

/// Build the sales router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sales", get(index).post(create))
        .route("/api/sales/{id}", delete(destroy))
}

/// List sales, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Sale>>, AppError> {
    Ok(Json(SaleService::new(state.store()).list().await?))
}

/// Record a sale against an open order.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<RecordSaleInput>,
) -> Result<(StatusCode, Json<Sale>), AppError> {
    let sale = SaleService::new(state.store()).record(input).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// Delete a sale.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<SaleId>,
) -> Result<StatusCode, AppError> {
    SaleService::new(state.store()).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
