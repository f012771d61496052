//! Integration tests for Hielitos.
//!
//! Everything runs against the in-memory store, so no database is needed:
//!
//! ```bash
//! cargo test -p hielitos-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `ledger_scenarios` - Service-level flows from recipe to balance
//! - `http_api` - The axum router driven through `tower::ServiceExt::oneshot`

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use hielitos_admin::db::Store;
use hielitos_admin::models::{CreateRecipeInput, IngredientInput, Recipe};
use hielitos_admin::services::{RecipeService, ServiceError};
use hielitos_admin::state::AppState;
use rust_decimal::Decimal;

/// A one-pixel PNG as a data URL.
pub const PNG_PHOTO: &str = "data:image/png;base64,iVBORw0KGgo=";

/// Response body size limit for test reads.
const BODY_LIMIT: usize = 1024 * 1024;

/// The router over a fresh in-memory store.
#[derive(Clone)]
pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AppState::in_memory(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        self.state.store()
    }

    /// Send one request and return the status with the raw body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = hielitos_admin::app(self.state.clone())
            .oneshot(request)
            .await
            .expect("infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.expect("body");
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Send one request and parse the body as JSON (`Null` when empty or
    /// not JSON).
    pub async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, text) = self.send(method, uri, body).await;
        (status, serde_json::from_str(&text).unwrap_or(Value::Null))
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a JSON decimal, which serializes as a string.
#[must_use]
pub fn decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}

/// Create the flour recipe: one ingredient, 2 kg at 3 each.
///
/// # Errors
///
/// Returns the service error if creation fails.
pub async fn flour_recipe(store: &Store) -> Result<Recipe, ServiceError> {
    RecipeService::new(store)
        .create(CreateRecipeInput {
            name: "Flour cubes".to_string(),
            ingredients: vec![IngredientInput {
                name: "flour".to_string(),
                quantity: Some(Decimal::from(2)),
                unit: "kg".to_string(),
                unit_price: Some(Decimal::from(3)),
            }],
            photo: Some(PNG_PHOTO.to_string()),
        })
        .await
}
