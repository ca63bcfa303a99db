//! Raw document store contract
//!
//! A [`DocumentStore`] addresses schemaless JSON documents by collection
//! name. Every document carries a server-assigned id and creation/update
//! timestamps next to its free-form fields. Typed access lives in
//! [`super::Collection`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Field map of a stored document
pub type Fields = Map<String, Value>;

/// Keys owned by the store; never taken from inserts or patches
pub const RESERVED_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// Errors raised by document store backends
#[derive(Error, Debug)]
pub enum StoreError {
    /// Query failed inside the database
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// Backend could not be reached (pool exhausted, connection refused, ...)
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// Document could not be converted to or from its typed form
    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored body is not a JSON object
    #[error("corrupt document {id} in '{collection}': {reason}")]
    Corrupt {
        collection: String,
        id: Uuid,
        reason: String,
    },
}

impl StoreError {
    /// Whether this error means the store itself is unreachable
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable(err.to_string())
            }
            other => Self::Database(other),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A document as held by the store
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub id: Uuid,
    pub fields: Fields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RawDocument {
    /// Flatten into a single JSON object, store-owned keys included
    pub fn into_value(self) -> Value {
        let mut object = self.fields;
        object.insert("id".to_string(), Value::String(self.id.to_string()));
        object.insert(
            "createdAt".to_string(),
            serde_json::to_value(self.created_at).unwrap_or(Value::Null),
        );
        object.insert(
            "updatedAt".to_string(),
            serde_json::to_value(self.updated_at).unwrap_or(Value::Null),
        );
        Value::Object(object)
    }
}

/// Equality filter over top-level document fields
///
/// A document matches when every constrained field is present with an
/// equal value. The empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Fields);

impl Filter {
    /// Filter matching every document of a collection
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter on a single field
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    /// Filter on a foreign key field pointing at `id`
    pub fn references(field: impl Into<String>, id: Uuid) -> Self {
        Self::eq(field, id.to_string())
    }

    /// Add another equality constraint
    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_fields(&self) -> &Fields {
        &self.0
    }

    /// Check a field map against this filter
    pub fn matches(&self, fields: &Fields) -> bool {
        self.0
            .iter()
            .all(|(key, expected)| fields.get(key) == Some(expected))
    }
}

/// Remove store-owned keys from caller supplied fields
pub fn strip_reserved(fields: &mut Fields) {
    for key in RESERVED_FIELDS {
        fields.remove(key);
    }
}

/// Persistence primitive addressed by collection name
///
/// Implementations must be safe for concurrent use; callers share one
/// handle across all requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs and health reports
    fn backend(&self) -> &'static str;

    /// Check that the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Fetch a document by id; `None` when absent
    async fn find_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<RawDocument>>;

    /// Fetch every document matching `filter`
    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<RawDocument>>;

    /// Store a new document under a fresh id
    async fn insert(&self, collection: &str, fields: Fields) -> StoreResult<RawDocument>;

    /// Merge `patch` into an existing document; `None` when absent
    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        patch: Fields,
    ) -> StoreResult<Option<RawDocument>>;

    /// Remove a document and return it; `None` when absent
    async fn delete_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<RawDocument>>;
}
