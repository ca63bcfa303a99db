//! PostgreSQL document store
//!
//! Documents live in a single JSONB table keyed by `(collection, id)`.
//! Equality filters map onto JSONB containment and partial updates onto
//! JSONB concatenation, so every operation is one statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::store::{
    strip_reserved, DocumentStore, Fields, Filter, RawDocument, StoreError, StoreResult,
};

/// Columns selected for every document query
const DOCUMENT_COLUMNS: &str = "id, body, created_at, updated_at";

/// Row shape of the `documents` table
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DocumentRow {
    fn into_document(self, collection: &str) -> StoreResult<RawDocument> {
        match self.body.0 {
            Value::Object(fields) => Ok(RawDocument {
                id: self.id,
                fields,
                created_at: self.created_at,
                updated_at: self.updated_at,
            }),
            other => Err(StoreError::Corrupt {
                collection: collection.to_string(),
                id: self.id,
                reason: format!("expected JSON object body, found {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// [`DocumentStore`] backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a new PgDocumentStore instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn convert_optional(
        collection: &str,
        row: Option<DocumentRow>,
    ) -> StoreResult<Option<RawDocument>> {
        row.map(|row| row.into_document(collection)).transpose()
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<RawDocument>> {
        let sql = format!(
            "SELECT {} FROM documents WHERE collection = $1 AND id = $2",
            DOCUMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Self::convert_optional(collection, row)
    }

    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<RawDocument>> {
        let sql = format!(
            "SELECT {} FROM documents WHERE collection = $1 AND body @> $2 ORDER BY created_at, id",
            DOCUMENT_COLUMNS
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection)
            .bind(Json(Value::Object(filter.as_fields().clone())))
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(collection, matched = rows.len(), "postgres find");
        rows.into_iter()
            .map(|row| row.into_document(collection))
            .collect()
    }

    async fn insert(&self, collection: &str, mut fields: Fields) -> StoreResult<RawDocument> {
        strip_reserved(&mut fields);

        let sql = format!(
            "INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3) RETURNING {}",
            DOCUMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection)
            .bind(Uuid::new_v4())
            .bind(Json(Value::Object(fields)))
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(collection, id = %row.id, "postgres insert");
        row.into_document(collection)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        mut patch: Fields,
    ) -> StoreResult<Option<RawDocument>> {
        strip_reserved(&mut patch);

        let sql = format!(
            r#"UPDATE documents
            SET body = body || $3, updated_at = now()
            WHERE collection = $1 AND id = $2
            RETURNING {}"#,
            DOCUMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection)
            .bind(id)
            .bind(Json(Value::Object(patch)))
            .fetch_optional(&self.pool)
            .await?;

        tracing::debug!(collection, %id, found = row.is_some(), "postgres update");
        Self::convert_optional(collection, row)
    }

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<RawDocument>> {
        let sql = format!(
            "DELETE FROM documents WHERE collection = $1 AND id = $2 RETURNING {}",
            DOCUMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        tracing::debug!(collection, %id, found = row.is_some(), "postgres delete");
        Self::convert_optional(collection, row)
    }
}
