//! In-memory document store
//!
//! Backs the API when `STORE_BACKEND=memory` and every test suite. All
//! clones share the same underlying map.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::store::{
    strip_reserved, DocumentStore, Fields, Filter, RawDocument, StoreResult,
};

type DocumentKey = (String, Uuid);

/// Concurrent in-memory [`DocumentStore`]
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<DashMap<DocumentKey, RawDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents across all collections
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn key(collection: &str, id: Uuid) -> DocumentKey {
        (collection.to_string(), id)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<RawDocument>> {
        Ok(self
            .documents
            .get(&Self::key(collection, id))
            .map(|entry| entry.value().clone()))
    }

    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<RawDocument>> {
        let mut found: Vec<RawDocument> = self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == collection && filter.matches(&entry.value().fields))
            .map(|entry| entry.value().clone())
            .collect();

        // DashMap iteration order is arbitrary; keep listings stable
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        tracing::debug!(collection, matched = found.len(), "memory find");
        Ok(found)
    }

    async fn insert(&self, collection: &str, mut fields: Fields) -> StoreResult<RawDocument> {
        strip_reserved(&mut fields);

        let now = Utc::now();
        let document = RawDocument {
            id: Uuid::new_v4(),
            fields,
            created_at: now,
            updated_at: now,
        };

        self.documents
            .insert(Self::key(collection, document.id), document.clone());

        tracing::debug!(collection, id = %document.id, "memory insert");
        Ok(document)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        mut patch: Fields,
    ) -> StoreResult<Option<RawDocument>> {
        strip_reserved(&mut patch);

        let Some(mut entry) = self.documents.get_mut(&Self::key(collection, id)) else {
            return Ok(None);
        };

        let document = entry.value_mut();
        document.fields.extend(patch);
        document.updated_at = Utc::now();

        tracing::debug!(collection, %id, "memory update");
        Ok(Some(document.clone()))
    }

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<RawDocument>> {
        let removed = self
            .documents
            .remove(&Self::key(collection, id))
            .map(|(_, document)| document);

        tracing::debug!(collection, %id, removed = removed.is_some(), "memory delete");
        Ok(removed)
    }
}
