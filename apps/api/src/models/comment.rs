//! Comment model

use async_graphql::MaybeUndefined;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repositories::Document;

/// Comment record from the `comments` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique comment identifier
    pub id: Uuid,

    /// Comment headline
    pub head: Option<String>,

    /// Comment text
    pub body: Option<String>,

    /// Book being commented on
    pub book_id: Option<Uuid>,

    /// Author of the comment
    pub user_id: Option<Uuid>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Stored name of the book foreign key
    pub const BOOK_ID: &'static str = "bookId";

    /// Stored name of the user foreign key
    pub const USER_ID: &'static str = "userId";
}

impl Document for Comment {
    const COLLECTION: &'static str = "comments";
    const RESOURCE: &'static str = "comment";
}

/// Comment creation input
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

/// Partial comment update
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPatch {
    #[serde(skip_serializing_if = "MaybeUndefined::is_undefined")]
    pub head: MaybeUndefined<String>,
    #[serde(skip_serializing_if = "MaybeUndefined::is_undefined")]
    pub body: MaybeUndefined<String>,
    #[serde(skip_serializing_if = "MaybeUndefined::is_undefined")]
    pub book_id: MaybeUndefined<Uuid>,
    #[serde(skip_serializing_if = "MaybeUndefined::is_undefined")]
    pub user_id: MaybeUndefined<Uuid>,
}
