//! `PostgreSQL` document store.
//!
//! Every collection shares one `documents` table; the body lives in a JSONB
//! column and `seq` records insertion order.

use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use hielitos_core::SortDirection;

use super::StoreError;
use super::store::{Collection, Document, require_object};

const INSERT: &str = "INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)";
const SELECT_ONE: &str = "SELECT id, data FROM documents WHERE collection = $1 AND id = $2";
const SELECT_ALL: &str = "SELECT id, data FROM documents WHERE collection = $1 ORDER BY seq";
const SELECT_WHERE: &str =
    "SELECT id, data FROM documents WHERE collection = $1 AND data -> $2 = $3 ORDER BY seq";
const SELECT_ORDERED_ASC: &str = "SELECT id, data FROM documents WHERE collection = $1 \
     ORDER BY data -> $2 ASC NULLS FIRST, seq";
const SELECT_ORDERED_DESC: &str = "SELECT id, data FROM documents WHERE collection = $1 \
     ORDER BY data -> $2 DESC NULLS LAST, seq";
const UPDATE_MERGE: &str =
    "UPDATE documents SET data = data || $3, updated_at = NOW() WHERE collection = $1 AND id = $2";
const DELETE: &str = "DELETE FROM documents WHERE collection = $1 AND id = $2";

/// Internal row type for document queries.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: String,
    data: Json<Value>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self::new(row.id, row.data.0)
    }
}

/// Documents stored in `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Borrow the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub(super) async fn insert(&self, collection: Collection, data: Value) -> Result<String, StoreError> {
        let body = require_object(data)?;
        let id = Uuid::new_v4().to_string();
        sqlx::query(INSERT)
            .bind(collection.as_str())
            .bind(&id)
            .bind(Json(Value::Object(body)))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    pub(super) async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(SELECT_ONE)
            .bind(collection.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Document::from))
    }

    pub(super) async fn get_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(SELECT_ALL)
            .bind(collection.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    pub(super) async fn get_where(
        &self,
        collection: Collection,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(SELECT_WHERE)
            .bind(collection.as_str())
            .bind(field)
            .bind(Json(value))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    pub(super) async fn get_all_ordered(
        &self,
        collection: Collection,
        field: &str,
        direction: SortDirection,
    ) -> Result<Vec<Document>, StoreError> {
        let sql = match direction {
            SortDirection::Asc => SELECT_ORDERED_ASC,
            SortDirection::Desc => SELECT_ORDERED_DESC,
        };
        let rows = sqlx::query_as::<_, DocumentRow>(sql)
            .bind(collection.as_str())
            .bind(field)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    pub(super) async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(UPDATE_MERGE)
            .bind(collection.as_str())
            .bind(id)
            .bind(Json(Value::Object(fields)))
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    pub(super) async fn delete(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(DELETE)
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
