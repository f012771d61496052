//! Recipe repository.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hielitos_core::RecipeId;
use hielitos_core::numeric::lenient;

use super::store::{Collection, Store};
use super::{RepositoryError, decode, decode_all, encode};
use crate::models::{Ingredient, NewRecipe, Recipe};

// =============================================================================
// Stored Document Types
// =============================================================================

/// Stored form of an ingredient line, shared with production orders.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct IngredientDocument {
    #[serde(default)]
    name: String,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient::decimal_or_zero"
    )]
    quantity: Decimal,
    #[serde(default)]
    unit: String,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient::decimal_or_zero"
    )]
    unit_price: Decimal,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient::decimal_or_zero"
    )]
    line_cost: Decimal,
}

impl From<&Ingredient> for IngredientDocument {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            quantity: ingredient.quantity,
            unit: ingredient.unit.clone(),
            unit_price: ingredient.unit_price,
            line_cost: ingredient.line_cost,
        }
    }
}

impl From<IngredientDocument> for Ingredient {
    fn from(doc: IngredientDocument) -> Self {
        Self {
            name: doc.name,
            quantity: doc.quantity,
            unit: doc.unit,
            unit_price: doc.unit_price,
            line_cost: doc.line_cost,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    ingredients: Vec<IngredientDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
}

impl From<&NewRecipe> for RecipeDocument {
    fn from(recipe: &NewRecipe) -> Self {
        Self {
            name: Some(recipe.name.clone()),
            ingredients: recipe.ingredients.iter().map(IngredientDocument::from).collect(),
            photo: recipe.photo.clone(),
        }
    }
}

impl RecipeDocument {
    fn into_model(self, id: String) -> Recipe {
        Recipe {
            id: RecipeId::new(id),
            name: self.name.unwrap_or_default(),
            ingredients: self.ingredients.into_iter().map(Ingredient::from).collect(),
            photo: self.photo,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for recipe documents.
pub struct RecipeRepository<'a> {
    store: &'a Store,
}

impl<'a> RecipeRepository<'a> {
    /// Create a new recipe repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Store a new recipe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store write fails.
    pub async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RepositoryError> {
        let body = encode(&RecipeDocument::from(recipe))?;
        let id = self.store.insert(Collection::Recipes, body).await?;
        Ok(Recipe {
            id: RecipeId::new(id),
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
            photo: recipe.photo.clone(),
        })
    }

    /// Get a recipe by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the document is unreadable.
    pub async fn get(&self, id: &RecipeId) -> Result<Option<Recipe>, RepositoryError> {
        let Some(document) = self.store.get(Collection::Recipes, id.as_str()).await? else {
            return Ok(None);
        };
        let (id, doc) = decode::<RecipeDocument>(document)?;
        Ok(Some(doc.into_model(id)))
    }

    /// List all recipes in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store read fails.
    pub async fn list(&self) -> Result<Vec<Recipe>, RepositoryError> {
        let documents = self.store.get_all(Collection::Recipes).await?;
        Ok(decode_all::<RecipeDocument>(Collection::Recipes, documents)
            .into_iter()
            .map(|(id, doc)| doc.into_model(id))
            .collect())
    }

    /// Delete a recipe. Orders referencing it are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such recipe exists.
    pub async fn delete(&self, id: &RecipeId) -> Result<(), RepositoryError> {
        if self.store.delete(Collection::Recipes, id.as_str()).await? {
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn mango() -> NewRecipe {
        NewRecipe {
            name: "Mango".to_string(),
            ingredients: vec![Ingredient::new(
                "mango",
                Decimal::new(15, 1),
                "kg",
                Decimal::from(2),
            )],
            photo: Some("data:image/png;base64,AAAA".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = Store::memory();
        let repo = RecipeRepository::new(&store);

        let created = repo.create(&mango()).await.unwrap();
        let fetched = repo.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Mango");
        assert_eq!(fetched.ingredients, created.ingredients);
        assert_eq!(fetched.cost(), Decimal::from(3));
    }

    #[tokio::test]
    async fn test_stored_numbers_are_json_numbers() {
        let store = Store::memory();
        let created = RecipeRepository::new(&store).create(&mango()).await.unwrap();

        let doc = store
            .get(Collection::Recipes, created.id.as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.data["ingredients"][0]["quantity"], json!(1.5));
        assert_eq!(doc.data["ingredients"][0]["lineCost"], json!(3.0));
    }

    #[tokio::test]
    async fn test_reads_loose_legacy_documents() {
        let store = Store::memory();
        store
            .insert(
                Collection::Recipes,
                json!({
                    "name": "Lime",
                    "ingredients": [{ "name": "lime", "quantity": "2", "unitPrice": "x" }]
                }),
            )
            .await
            .unwrap();

        let recipes = RecipeRepository::new(&store).list().await.unwrap();
        assert_eq!(recipes.len(), 1);
        let line = &recipes[0].ingredients[0];
        assert_eq!(line.quantity, Decimal::from(2));
        assert_eq!(line.unit_price, Decimal::ZERO);
        assert_eq!(line.line_cost, Decimal::ZERO);
        assert!(recipes[0].photo.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_recipe() {
        let store = Store::memory();
        let result = RecipeRepository::new(&store)
            .delete(&RecipeId::new("missing"))
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }
}
