//! Typed collection adapter
//!
//! [`Collection`] gives one entity kind the five store operations in terms
//! of its own record type. Inputs and patches are any `Serialize` value
//! that produces a JSON object; patches only carry the keys that should
//! change.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use super::store::{DocumentStore, Fields, Filter, RawDocument, StoreError, StoreResult};

/// A record type persisted in a named collection
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name in the document store
    const COLLECTION: &'static str;

    /// Resource name used in logs and error messages
    const RESOURCE: &'static str;
}

/// Typed view over one collection of a [`DocumentStore`]
pub struct Collection<D> {
    store: Arc<dyn DocumentStore>,
    _record: PhantomData<fn() -> D>,
}

impl<D> Clone for Collection<D> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _record: PhantomData,
        }
    }
}

impl<D: Document> Collection<D> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Find a record by id; `None` when no record has that id
    pub async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<D>> {
        self.store
            .find_by_id(D::COLLECTION, id)
            .await?
            .map(decode)
            .transpose()
    }

    /// Find every record matching `filter`
    pub async fn find(&self, filter: &Filter) -> StoreResult<Vec<D>> {
        self.store
            .find(D::COLLECTION, filter)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// List every record of this kind
    pub async fn find_all(&self) -> StoreResult<Vec<D>> {
        self.find(&Filter::all()).await
    }

    /// Insert a new record built from `input`
    pub async fn insert<I: Serialize>(&self, input: &I) -> StoreResult<D> {
        let fields = encode(input)?;
        let document = self.store.insert(D::COLLECTION, fields).await?;
        tracing::debug!(resource = D::RESOURCE, id = %document.id, "Record created");
        decode(document)
    }

    /// Apply `patch` to the record with `id`; `None` when it does not exist
    pub async fn update_by_id<P: Serialize>(&self, id: Uuid, patch: &P) -> StoreResult<Option<D>> {
        let patch = encode(patch)?;
        let updated = self.store.update_by_id(D::COLLECTION, id, patch).await?;
        if updated.is_none() {
            tracing::debug!(resource = D::RESOURCE, %id, "Update target not found");
        }
        updated.map(decode).transpose()
    }

    /// Delete the record with `id` and return it; `None` when it does not exist
    pub async fn delete_by_id(&self, id: Uuid) -> StoreResult<Option<D>> {
        let removed = self.store.delete_by_id(D::COLLECTION, id).await?;
        tracing::debug!(
            resource = D::RESOURCE,
            %id,
            removed = removed.is_some(),
            "Record deleted"
        );
        removed.map(decode).transpose()
    }
}

fn encode<T: Serialize>(value: &T) -> StoreResult<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::Serialization(<serde_json::Error as serde::ser::Error>::custom(format!(
            "document input must serialize to an object, got {}",
            other
        )))),
    }
}

fn decode<D: Document>(document: RawDocument) -> StoreResult<D> {
    Ok(serde_json::from_value(document.into_value())?)
}
