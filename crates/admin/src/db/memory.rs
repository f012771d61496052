//! In-memory document store.
//!
//! Used for local runs without `DATABASE_URL` and throughout the tests.
//! Contents are lost when the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use hielitos_core::SortDirection;

use super::StoreError;
use super::store::{Collection, Document, compare_field, require_object};

/// Collections held in process memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<Document>>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) async fn insert(&self, collection: Collection, data: Value) -> Result<String, StoreError> {
        let body = require_object(data)?;
        let id = Uuid::new_v4().to_string();
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(Document::new(id.clone(), Value::Object(body)));
        Ok(id)
    }

    pub(super) async fn get(&self, collection: Collection, id: &str) -> Option<Document> {
        self.collections
            .read()
            .await
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id).cloned())
    }

    pub(super) async fn get_all(&self, collection: Collection) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    pub(super) async fn get_where(&self, collection: Collection, field: &str, value: &Value) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| doc.data.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(super) async fn get_all_ordered(
        &self,
        collection: Collection,
        field: &str,
        direction: SortDirection,
    ) -> Vec<Document> {
        let mut docs = self.get_all(collection).await;
        // sort_by is stable, so ties keep insertion order
        match direction {
            SortDirection::Asc => docs.sort_by(|a, b| compare_field(&a.data, &b.data, field)),
            SortDirection::Desc => docs.sort_by(|a, b| compare_field(&b.data, &a.data, field)),
        }
        docs
    }

    pub(super) async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| StoreError::NotFound {
                collection,
                id: id.to_string(),
            })?;
        if let Value::Object(body) = &mut document.data {
            body.extend(fields);
        }
        Ok(())
    }

    pub(super) async fn delete(&self, collection: Collection, id: &str) -> bool {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return false;
        };
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        docs.len() != before
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryStore::new();
        let id = store
            .insert(Collection::Recipes, json!({ "name": "Mango" }))
            .await
            .unwrap();

        let doc = store.get(Collection::Recipes, &id).await.unwrap();
        assert_eq!(doc.data["name"], "Mango");
        assert!(store.get(Collection::Sales, &id).await.is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_non_objects() {
        let store = MemoryStore::new();
        let result = store.insert(Collection::Recipes, json!("nope")).await;
        assert!(matches!(result, Err(StoreError::InvalidDocument(_))));
    }

    #[tokio::test]
    async fn test_get_all_keeps_insertion_order() {
        let store = MemoryStore::new();
        for n in ["b", "a", "c"] {
            store.insert(Collection::Sales, json!({ "n": n })).await.unwrap();
        }
        let names: Vec<_> = store
            .get_all(Collection::Sales)
            .await
            .into_iter()
            .map(|d| d.data["n"].clone())
            .collect();
        assert_eq!(names, vec![json!("b"), json!("a"), json!("c")]);
    }

    #[tokio::test]
    async fn test_get_where() {
        let store = MemoryStore::new();
        store.insert(Collection::Sales, json!({ "orderId": "o1" })).await.unwrap();
        store.insert(Collection::Sales, json!({ "orderId": "o2" })).await.unwrap();
        store.insert(Collection::Sales, json!({ "orderId": "o1" })).await.unwrap();

        let hits = store.get_where(Collection::Sales, "orderId", &json!("o1")).await;
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_get_all_ordered_desc_is_stable() {
        let store = MemoryStore::new();
        let first = store
            .insert(Collection::Sales, json!({ "at": "2024-01-02", "n": 1 }))
            .await
            .unwrap();
        store.insert(Collection::Sales, json!({ "at": "2024-01-01" })).await.unwrap();
        let third = store
            .insert(Collection::Sales, json!({ "at": "2024-01-02", "n": 3 }))
            .await
            .unwrap();
        store.insert(Collection::Sales, json!({})).await.unwrap();

        let docs = store
            .get_all_ordered(Collection::Sales, "at", SortDirection::Desc)
            .await;
        assert_eq!(docs[0].id, first);
        assert_eq!(docs[1].id, third);
        assert_eq!(docs[2].data["at"], "2024-01-01");
        assert!(docs[3].data.get("at").is_none());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        let id = store
            .insert(Collection::ProductionOrders, json!({ "batchCount": 2, "totalCost": 16 }))
            .await
            .unwrap();

        let mut fields = Map::new();
        fields.insert("batchCount".to_string(), json!(3));
        store.update(Collection::ProductionOrders, &id, fields).await.unwrap();

        let doc = store.get(Collection::ProductionOrders, &id).await.unwrap();
        assert_eq!(doc.data, json!({ "batchCount": 3, "totalCost": 16 }));
    }

    #[tokio::test]
    async fn test_update_missing_document() {
        let store = MemoryStore::new();
        let result = store
            .update(Collection::ProductionOrders, "missing", Map::new())
            .await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        let id = store.insert(Collection::CashMovements, json!({})).await.unwrap();
        assert!(store.delete(Collection::CashMovements, &id).await);
        assert!(!store.delete(Collection::CashMovements, &id).await);
        assert!(store.get_all(Collection::CashMovements).await.is_empty());
    }
}
