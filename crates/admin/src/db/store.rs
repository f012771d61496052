//! Backend-agnostic document store.

use std::cmp::Ordering;
use std::fmt;

use serde_json::{Map, Value};
use sqlx::PgPool;

use hielitos_core::SortDirection;

use super::StoreError;
use super::memory::MemoryStore;
use super::postgres::PgStore;

/// Named document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Recipes,
    ProductionOrders,
    Sales,
    CashMovements,
}

impl Collection {
    /// Collection name as stored.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recipes => "recipes",
            Self::ProductionOrders => "productionOrders",
            Self::Sales => "sales",
            Self::CashMovements => "cashMovements",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document: its id and JSON object body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    #[must_use]
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// Check that a document body is a JSON object.
pub(super) fn require_object(data: Value) -> Result<Map<String, Value>, StoreError> {
    match data {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Order two document bodies by one top-level field.
///
/// Missing and null fields sort first, then booleans, numbers, strings and
/// compound values. Numbers compare numerically, strings lexicographically.
#[must_use]
pub fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    let left = a.get(field).unwrap_or(&Value::Null);
    let right = b.get(field).unwrap_or(&Value::Null);
    match (left, right) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => type_rank(left).cmp(&type_rank(right)),
    }
}

const fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Document store handle, cheap to clone.
#[derive(Debug, Clone)]
pub enum Store {
    Memory(MemoryStore),
    Postgres(PgStore),
}

impl Store {
    /// An empty in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// A store backed by the `documents` table.
    #[must_use]
    pub const fn postgres(pool: PgPool) -> Self {
        Self::Postgres(PgStore::new(pool))
    }

    /// Backend name for logs and health output.
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }

    /// Insert a new document and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidDocument` if `data` is not an object, or a
    /// backend error.
    pub async fn insert(&self, collection: Collection, data: Value) -> Result<String, StoreError> {
        match self {
            Self::Memory(store) => store.insert(collection, data).await,
            Self::Postgres(store) => store.insert(collection, data).await,
        }
    }

    /// Fetch one document by id.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    pub async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        match self {
            Self::Memory(store) => Ok(store.get(collection, id).await),
            Self::Postgres(store) => store.get(collection, id).await,
        }
    }

    /// Fetch every document in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    pub async fn get_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        match self {
            Self::Memory(store) => Ok(store.get_all(collection).await),
            Self::Postgres(store) => store.get_all(collection).await,
        }
    }

    /// Fetch documents whose top-level `field` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    pub async fn get_where(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        match self {
            Self::Memory(store) => Ok(store.get_where(collection, field, value).await),
            Self::Postgres(store) => store.get_where(collection, field, value).await,
        }
    }

    /// Fetch every document ordered by a top-level field.
    ///
    /// Ties keep insertion order.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    pub async fn get_all_ordered(
        &self,
        collection: Collection,
        field: &str,
        direction: SortDirection,
    ) -> Result<Vec<Document>, StoreError> {
        match self {
            Self::Memory(store) => Ok(store.get_all_ordered(collection, field, direction).await),
            Self::Postgres(store) => store.get_all_ordered(collection, field, direction).await,
        }
    }

    /// Merge top-level fields into an existing document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the document does not exist, or a
    /// backend error.
    pub async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.update(collection, id, fields).await,
            Self::Postgres(store) => store.update(collection, id, fields).await,
        }
    }

    /// Delete a document. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    pub async fn delete(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        match self {
            Self::Memory(store) => Ok(store.delete(collection, id).await),
            Self::Postgres(store) => store.delete(collection, id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::ProductionOrders.as_str(), "productionOrders");
        assert_eq!(Collection::CashMovements.to_string(), "cashMovements");
    }

    #[test]
    fn test_compare_field() {
        let a = json!({ "n": 2, "s": "2024-01-01" });
        let b = json!({ "n": 10, "s": "2023-12-31" });
        let missing = json!({});
        assert_eq!(compare_field(&a, &b, "n"), Ordering::Less);
        assert_eq!(compare_field(&a, &b, "s"), Ordering::Greater);
        assert_eq!(compare_field(&missing, &a, "s"), Ordering::Less);
        assert_eq!(compare_field(&missing, &missing, "s"), Ordering::Equal);
    }

    #[test]
    fn test_require_object() {
        assert!(require_object(json!({ "a": 1 })).is_ok());
        assert!(matches!(
            require_object(json!([1, 2])),
            Err(StoreError::InvalidDocument(_))
        ));
    }
}
