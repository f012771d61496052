//! Cash movement API handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use tracing::instrument;

use hielitos_core::CashMovementId;

use crate::error::AppError;
use crate::models::{CashMovement, RecordCashMovementInput};
use crate::services::CashService;
use crate::state::AppState;

/// Build the cash movements router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/cash-movements", get(index).post(create))
        .route("/api/cash-movements/{id}", delete(destroy))
}

/// List movements, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<CashMovement>>, AppError> {
    Ok(Json(CashService::new(state.store()).list().await?))
}

/// Record a movement.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<RecordCashMovementInput>,
) -> Result<(StatusCode, Json<CashMovement>), AppError> {
    let movement = CashService::new(state.store()).record(input).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

/// Delete a movement.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<CashMovementId>,
) -> Result<StatusCode, AppError> {
    CashService::new(state.store()).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
