//! Author model

use async_graphql::MaybeUndefined;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repositories::Document;

/// Author record from the `authors` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Unique author identifier
    pub id: Uuid,

    /// Author name
    pub name: Option<String>,

    /// Country of origin
    pub country: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Document for Author {
    const COLLECTION: &'static str = "authors";
    const RESOURCE: &'static str = "author";
}

/// Author creation input
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewAuthor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Partial author update
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorPatch {
    #[serde(skip_serializing_if = "MaybeUndefined::is_undefined")]
    pub name: MaybeUndefined<String>,
    #[serde(skip_serializing_if = "MaybeUndefined::is_undefined")]
    pub country: MaybeUndefined<String>,
}
