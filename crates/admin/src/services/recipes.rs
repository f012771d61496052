//! Recipe service.

use tracing::{info, instrument};

use hielitos_core::RecipeId;
use hielitos_core::numeric::storable_amount;

use super::{ServiceError, ValidationError};
use crate::db::{RecipeRepository, Store};
use crate::models::{CreateRecipeInput, Ingredient, IngredientInput, NewRecipe, Recipe};

/// Create, list and delete recipes.
pub struct RecipeService<'a> {
    store: &'a Store,
}

impl<'a> RecipeService<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Validate and store a recipe.
    ///
    /// Incomplete ingredient rows are dropped; at least one must remain.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if the name or photo is missing or
    /// no ingredient row is complete.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CreateRecipeInput) -> Result<Recipe, ServiceError> {
        let recipe = validate(input)?;
        let created = RecipeRepository::new(self.store).create(&recipe).await?;
        info!(recipe_id = %created.id, ingredients = created.ingredients.len(), "Created recipe");
        Ok(created)
    }

    /// All recipes in creation order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store read fails.
    pub async fn list(&self) -> Result<Vec<Recipe>, ServiceError> {
        Ok(RecipeRepository::new(self.store).list().await?)
    }

    /// Look up one recipe. A miss is not an error: orders outlive recipes.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store read fails.
    pub async fn find(&self, id: &RecipeId) -> Result<Option<Recipe>, ServiceError> {
        Ok(RecipeRepository::new(self.store).get(id).await?)
    }

    /// Delete a recipe. Orders keep their snapshot of it.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the recipe does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &RecipeId) -> Result<(), ServiceError> {
        RecipeRepository::new(self.store)
            .delete(id)
            .await
            .map_err(|e| ServiceError::or_not_found(e, || format!("recipe {id}")))?;
        info!(recipe_id = %id, "Deleted recipe");
        Ok(())
    }
}

fn validate(input: CreateRecipeInput) -> Result<NewRecipe, ValidationError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required("name"));
    }
    let ingredients: Vec<Ingredient> = input
        .ingredients
        .iter()
        .filter_map(IngredientInput::to_ingredient)
        .collect();
    if ingredients.is_empty() {
        return Err(ValidationError::NoValidIngredients);
    }
    for ingredient in &ingredients {
        storable_amount(ingredient.quantity)
            .and_then(|_| storable_amount(ingredient.unit_price))
            .map_err(|e| ValidationError::numeric("ingredients", &e))?;
    }
    let photo = input
        .photo
        .filter(|photo| !photo.trim().is_empty())
        .ok_or(ValidationError::Required("photo"))?;
    Ok(NewRecipe {
        name: name.to_string(),
        ingredients,
        photo: Some(photo),
    })
}
