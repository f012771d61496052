//! Recipe API handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use hielitos_core::RecipeId;

use crate::error::AppError;
use crate::models::{CreateRecipeInput, Recipe};
use crate::services::RecipeService;
use crate::state::AppState;

/// Build the recipes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/recipes", get(index).post(create))
        .route("/api/recipes/{id}", delete(destroy))
}

/// A recipe with its summed ingredient cost.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub cost: Decimal,
}

impl From<Recipe> for RecipeView {
    fn from(recipe: Recipe) -> Self {
        Self {
            cost: recipe.cost(),
            recipe,
        }
    }
}

/// List recipes.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<RecipeView>>, AppError> {
    let recipes = RecipeService::new(state.store()).list().await?;
    Ok(Json(recipes.into_iter().map(RecipeView::from).collect()))
}

/// Create a recipe.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRecipeInput>,
) -> Result<(StatusCode, Json<RecipeView>), AppError> {
    let recipe = RecipeService::new(state.store()).create(input).await?;
    Ok((StatusCode::CREATED, Json(recipe.into())))
}

/// Delete a recipe.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<RecipeId>,
) -> Result<StatusCode, AppError> {
    RecipeService::new(state.store()).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
