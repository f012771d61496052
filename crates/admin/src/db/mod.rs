//! Document storage for the ledger.
//!
//! # Collections
//!
//! - `recipes` - Recipes with their ingredient lines
//! - `productionOrders` - Batch runs with cost snapshots
//! - `sales` - Units sold or spoiled per order
//! - `cashMovements` - Withdrawals, investments and expenses
//!
//! Documents are JSON objects keyed by a store-assigned id. Two backends
//! implement the same interface: [`MemoryStore`] and [`PgStore`] (one
//! `documents` table with a JSONB body).
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p hielitos-cli -- migrate
//! ```

pub mod cash_movements;
pub mod memory;
pub mod postgres;
pub mod production_orders;
pub mod recipes;
pub mod sales;
pub mod store;

use std::time::Duration;

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing::warn;

pub use cash_movements::CashMovementRepository;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use production_orders::ProductionOrderRepository;
pub use recipes::RecipeRepository;
pub use sales::SaleRepository;
pub use store::{Collection, Document, Store};

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Document body is not a JSON object.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// No document with this id exists in the collection.
    #[error("document {id} not found in {collection}")]
    NotFound { collection: Collection, id: String },
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The storage backend failed.
    #[error("store error: {0}")]
    Store(StoreError),

    /// A stored document could not be read or written as its model.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

// =============================================================================
// Document Conversion
// =============================================================================

/// Serialize a stored-document struct into a JSON body.
fn encode<T: Serialize>(document: &T) -> Result<Value, RepositoryError> {
    serde_json::to_value(document).map_err(|e| RepositoryError::DataCorruption(e.to_string()))
}

/// Deserialize one document body.
fn decode<T: DeserializeOwned>(document: Document) -> Result<(String, T), RepositoryError> {
    let Document { id, data } = document;
    serde_json::from_value(data)
        .map(|body| (id.clone(), body))
        .map_err(|e| RepositoryError::DataCorruption(format!("document {id}: {e}")))
}

/// Deserialize a list of documents, skipping and logging unreadable ones.
fn decode_all<T: DeserializeOwned>(collection: Collection, documents: Vec<Document>) -> Vec<(String, T)> {
    documents
        .into_iter()
        .filter_map(|document| match decode(document) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(%collection, error = %e, "Skipping unreadable document");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_repository_not_found() {
        let err: RepositoryError = StoreError::NotFound {
            collection: Collection::Sales,
            id: "x".to_string(),
        }
        .into();
        assert!(matches!(err, RepositoryError::NotFound));

        let err: RepositoryError = StoreError::InvalidDocument("array".to_string()).into();
        assert!(matches!(err, RepositoryError::Store(_)));
    }

    #[test]
    fn test_decode_all_skips_bad_documents() {
        #[derive(serde::Deserialize)]
        struct Named {
            name: String,
        }

        let docs = vec![
            Document::new("a", serde_json::json!({ "name": "ok" })),
            Document::new("b", serde_json::json!({ "name": 5 })),
        ];
        let decoded: Vec<(String, Named)> = decode_all(Collection::Recipes, docs);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].0, "a");
        assert_eq!(decoded[0].1.name, "ok");
    }
}
