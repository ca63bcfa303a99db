//! Author GraphQL type

use async_graphql::{Context, Object, ID};
use chrono::{DateTime, Utc};

use crate::graphql::{nullable, to_graphql_error};
use crate::models::{Author as DbAuthor, Book as DbBook};
use crate::repositories::{Filter, StoreRegistry};

use super::book::Book;

/// Author exposed via GraphQL
pub struct Author {
    inner: DbAuthor,
}

impl Author {
    /// Create a new GraphQL Author from a stored Author
    pub fn new(author: DbAuthor) -> Self {
        Self { inner: author }
    }
}

impl From<DbAuthor> for Author {
    fn from(author: DbAuthor) -> Self {
        Self::new(author)
    }
}

#[Object]
impl Author {
    /// Unique author identifier
    async fn id(&self) -> ID {
        ID::from(self.inner.id.to_string())
    }

    /// Author name
    async fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Country of origin
    async fn country(&self) -> Option<&str> {
        self.inner.country.as_deref()
    }

    /// Creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Last update timestamp
    async fn updated_at(&self) -> DateTime<Utc> {
        self.inner.updated_at
    }

    /// Books whose `authorId` is this author
    async fn books(&self, ctx: &Context<'_>) -> Option<Vec<Book>> {
        nullable(ctx, async {
            let registry = ctx.data::<StoreRegistry>()?;
            let books = registry
                .books
                .find(&Filter::references(DbBook::AUTHOR_ID, self.inner.id))
                .await
                .map_err(to_graphql_error)?;
            Ok(Some(books.into_iter().map(Book::from).collect()))
        })
        .await
    }
}
