//! Document store layer for Bookshelf
//!
//! This module provides the data access layer:
//! - [`DocumentStore`]: raw persistence addressed by collection name
//! - [`PgDocumentStore`] / [`MemoryDocumentStore`]: the two backends
//! - [`Collection`]: typed per-entity adapter over a store
//! - [`StoreRegistry`]: one collection per entity kind, built once at startup

pub mod collection;
pub mod memory;
pub mod postgres;
pub mod store;

pub use collection::{Collection, Document};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use store::{DocumentStore, Fields, Filter, RawDocument, StoreError, StoreResult};

use std::sync::Arc;

use crate::models::{Author, Book, Comment, User};

/// Handles to every entity collection, sharing one document store
///
/// Constructed once at startup and injected into the GraphQL schema.
#[derive(Clone)]
pub struct StoreRegistry {
    store: Arc<dyn DocumentStore>,
    pub authors: Collection<Author>,
    pub books: Collection<Book>,
    pub users: Collection<User>,
    pub comments: Collection<Comment>,
}

impl StoreRegistry {
    /// Create a registry over the given backend
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            authors: Collection::new(Arc::clone(&store)),
            books: Collection::new(Arc::clone(&store)),
            users: Collection::new(Arc::clone(&store)),
            comments: Collection::new(Arc::clone(&store)),
            store,
        }
    }

    /// Registry backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryDocumentStore::new()))
    }

    /// Name of the underlying backend
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Check that the underlying backend is reachable
    pub async fn ping(&self) -> StoreResult<()> {
        self.store.ping().await
    }
}

impl std::fmt::Debug for StoreRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreRegistry")
            .field("backend", &self.backend())
            .finish_non_exhaustive()
    }
}
