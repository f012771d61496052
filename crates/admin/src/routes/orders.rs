//! Production order API handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};
use serde::Serialize;
use tracing::instrument;

use hielitos_core::ProductionOrderId;

use crate::error::AppError;
use crate::ledger::OrderFulfillment;
use crate::models::{CreateProductionOrderInput, ProductionOrder, Sale, UpdateBatchesInput};
use crate::services::{LedgerService, ProductionService, SaleService};
use crate::state::AppState;

/// Build the production orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(index).post(create))
        .route("/api/orders/available", get(available))
        .route("/api/orders/overview", get(overview))
        .route("/api/orders/{id}", patch(update_batches).delete(destroy))
        .route("/api/orders/{id}/sales", get(sales))
}

/// One row of the fulfillment overview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOverviewView {
    pub order: ProductionOrder,
    pub fulfillment: OrderFulfillment,
    pub sales: Vec<Sale>,
}

/// List orders, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<ProductionOrder>>, AppError> {
    Ok(Json(ProductionService::new(state.store()).list().await?))
}

/// Create an order.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProductionOrderInput>,
) -> Result<(StatusCode, Json<ProductionOrder>), AppError> {
    let order = ProductionService::new(state.store()).create(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Orders that still have units to sell, newest first.
#[instrument(skip(state))]
pub async fn available(State(state): State<AppState>) -> Result<Json<Vec<ProductionOrder>>, AppError> {
    let snapshot = LedgerService::new(state.store()).snapshot().await?;
    Ok(Json(snapshot.available_orders().into_iter().cloned().collect()))
}

/// Fulfillment figures for every order.
#[instrument(skip(state))]
pub async fn overview(State(state): State<AppState>) -> Result<Json<Vec<OrderOverviewView>>, AppError> {
    let snapshot = LedgerService::new(state.store()).snapshot().await?;
    let rows = snapshot
        .overview()
        .into_iter()
        .map(|row| OrderOverviewView {
            order: row.order.clone(),
            fulfillment: row.fulfillment,
            sales: row.sales.into_iter().cloned().collect(),
        })
        .collect();
    Ok(Json(rows))
}

/// Edit batch count and units per batch.
#[instrument(skip(state, input))]
pub async fn update_batches(
    State(state): State<AppState>,
    Path(id): Path<ProductionOrderId>,
    Json(input): Json<UpdateBatchesInput>,
) -> Result<Json<ProductionOrder>, AppError> {
    let order = ProductionService::new(state.store())
        .update_batches(&id, input)
        .await?;
    Ok(Json(order))
}

/// Delete an order.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<ProductionOrderId>,
) -> Result<StatusCode, AppError> {
    ProductionService::new(state.store()).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Sales of one order, newest first.
#[instrument(skip(state))]
pub async fn sales(
    State(state): State<AppState>,
    Path(id): Path<ProductionOrderId>,
) -> Result<Json<Vec<Sale>>, AppError> {
    ProductionService::new(state.store()).get(&id).await?;
    Ok(Json(SaleService::new(state.store()).list_for_order(&id).await?))
}
