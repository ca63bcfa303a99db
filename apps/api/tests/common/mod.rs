//! Common test utilities for API integration tests
//!
//! Builds schemas over an in-memory store, runs GraphQL documents and
//! provides a store double whose backend is always unreachable.

#![allow(dead_code)]

use std::sync::Arc;

use async_graphql::{PathSegment, Request};
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use bookshelf_api::repositories::{
    DocumentStore, Fields, Filter, RawDocument, StoreError, StoreResult,
};
use bookshelf_api::{build_schema, BookshelfSchema, MemoryDocumentStore, StoreRegistry};

/// Schema over a fresh in-memory store
pub fn memory_schema() -> BookshelfSchema {
    build_schema(StoreRegistry::new(Arc::new(MemoryDocumentStore::new())))
}

/// Schema whose store never answers
pub fn unavailable_schema() -> BookshelfSchema {
    build_schema(StoreRegistry::new(Arc::new(UnavailableStore)))
}

/// Result of running one GraphQL document
pub struct Outcome {
    pub data: Value,
    pub errors: Vec<async_graphql::ServerError>,
}

impl Outcome {
    /// Error codes in response order
    pub fn error_codes(&self) -> Vec<String> {
        self.errors
            .iter()
            .filter_map(|e| match e.extensions.as_ref()?.get("code")? {
                async_graphql::Value::String(code) => Some(code.clone()),
                _ => None,
            })
            .collect()
    }

    /// Path of the first error, joined with dots
    pub fn first_error_path(&self) -> String {
        self.errors
            .first()
            .map(|e| {
                e.path
                    .iter()
                    .map(|segment| match segment {
                        PathSegment::Field(name) => name.clone(),
                        PathSegment::Index(i) => i.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".")
            })
            .unwrap_or_default()
    }
}

/// Execute a document and convert the data to JSON
pub async fn run(schema: &BookshelfSchema, query: impl Into<Request>) -> Outcome {
    let response = schema.execute(query).await;
    Outcome {
        data: response.data.into_json().expect("response data is valid JSON"),
        errors: response.errors,
    }
}

/// Execute a document that must not produce errors
pub async fn run_ok(schema: &BookshelfSchema, query: impl Into<Request>) -> Value {
    let outcome = run(schema, query).await;
    assert!(
        outcome.errors.is_empty(),
        "unexpected errors: {:?}",
        outcome.errors
    );
    outcome.data
}

/// Add an author and return its id
pub async fn add_author(schema: &BookshelfSchema, name: &str, country: &str) -> String {
    let data = run_ok(
        schema,
        format!(r#"mutation {{ addAuthor(name: "{name}", country: "{country}") {{ id }} }}"#),
    )
    .await;
    id_of(&data["addAuthor"])
}

/// Add a book, optionally by an author, and return its id
pub async fn add_book(schema: &BookshelfSchema, title: &str, author_id: Option<&str>) -> String {
    let author_arg = author_id
        .map(|id| format!(r#", authorId: "{id}""#))
        .unwrap_or_default();
    let data = run_ok(
        schema,
        format!(r#"mutation {{ addBook(title: "{title}"{author_arg}) {{ id }} }}"#),
    )
    .await;
    id_of(&data["addBook"])
}

/// Add a user and return its id
pub async fn add_user(schema: &BookshelfSchema, name: &str) -> String {
    let data = run_ok(
        schema,
        format!(r#"mutation {{ addUser(name: "{name}") {{ id }} }}"#),
    )
    .await;
    id_of(&data["addUser"])
}

/// Add a comment and return its id
pub async fn add_comment(
    schema: &BookshelfSchema,
    head: &str,
    book_id: &str,
    user_id: &str,
) -> String {
    let data = run_ok(
        schema,
        format!(
            r#"mutation {{ addComment(head: "{head}", body: "about {head}", bookId: "{book_id}", userId: "{user_id}") {{ id }} }}"#
        ),
    )
    .await;
    id_of(&data["addComment"])
}

/// The `id` field of a returned object
pub fn id_of(value: &Value) -> String {
    value["id"]
        .as_str()
        .expect("object has a string id")
        .to_string()
}

/// Value under `key` when the key is present in the object
///
/// Unlike indexing, this tells a `null` field apart from a missing one.
pub fn field<'a>(object: &'a Value, key: &str) -> Option<&'a Value> {
    object.as_object()?.get(key)
}

/// Sorted values of `field` across a JSON array
pub fn sorted_field(list: &Value, field: &str) -> Vec<String> {
    let mut values: Vec<String> = list
        .as_array()
        .expect("value is a list")
        .iter()
        .map(|item| item[field].as_str().unwrap_or_default().to_string())
        .collect();
    values.sort();
    values
}

/// Document store whose backend can never be reached
pub struct UnavailableStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("connection refused".to_string()))
}

#[async_trait]
impl DocumentStore for UnavailableStore {
    fn backend(&self) -> &'static str {
        "unavailable"
    }

    async fn ping(&self) -> StoreResult<()> {
        down()
    }

    async fn find_by_id(&self, _: &str, _: Uuid) -> StoreResult<Option<RawDocument>> {
        down()
    }

    async fn find(&self, _: &str, _: &Filter) -> StoreResult<Vec<RawDocument>> {
        down()
    }

    async fn insert(&self, _: &str, _: Fields) -> StoreResult<RawDocument> {
        down()
    }

    async fn update_by_id(&self, _: &str, _: Uuid, _: Fields) -> StoreResult<Option<RawDocument>> {
        down()
    }

    async fn delete_by_id(&self, _: &str, _: Uuid) -> StoreResult<Option<RawDocument>> {
        down()
    }
}
