//! Book model

use async_graphql::MaybeUndefined;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repositories::Document;

/// Book record from the `books` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique book identifier
    pub id: Uuid,

    /// Book title
    pub title: Option<String>,

    /// Referenced author; may point at a deleted author
    pub author_id: Option<Uuid>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Stored name of the author foreign key
    pub const AUTHOR_ID: &'static str = "authorId";
}

impl Document for Book {
    const COLLECTION: &'static str = "books";
    const RESOURCE: &'static str = "book";
}

/// Book creation input
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Uuid>,
}

/// Partial book update
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(skip_serializing_if = "MaybeUndefined::is_undefined")]
    pub title: MaybeUndefined<String>,
    #[serde(skip_serializing_if = "MaybeUndefined::is_undefined")]
    pub author_id: MaybeUndefined<Uuid>,
}
