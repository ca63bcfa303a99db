//! Book GraphQL type

use async_graphql::{Context, Object, ID};
use chrono::{DateTime, Utc};

use crate::graphql::{nullable, to_graphql_error};
use crate::models::{Book as DbBook, Comment as DbComment};
use crate::repositories::{Filter, StoreRegistry};

use super::author::Author;
use super::comment::Comment;

/// Book exposed via GraphQL
pub struct Book {
    inner: DbBook,
}

impl Book {
    /// Create a new GraphQL Book from a stored Book
    pub fn new(book: DbBook) -> Self {
        Self { inner: book }
    }
}

impl From<DbBook> for Book {
    fn from(book: DbBook) -> Self {
        Self::new(book)
    }
}

#[Object]
impl Book {
    /// Unique book identifier
    async fn id(&self) -> ID {
        ID::from(self.inner.id.to_string())
    }

    /// Book title
    async fn title(&self) -> Option<&str> {
        self.inner.title.as_deref()
    }

    /// Referenced author id, as stored
    async fn author_id(&self) -> Option<ID> {
        self.inner.author_id.map(|id| ID::from(id.to_string()))
    }

    /// Creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Last update timestamp
    async fn updated_at(&self) -> DateTime<Utc> {
        self.inner.updated_at
    }

    // Relationship resolvers

    /// The book's author; null when unset or no longer present
    async fn author(&self, ctx: &Context<'_>) -> Option<Author> {
        let author_id = self.inner.author_id?;

        nullable(ctx, async {
            let registry = ctx.data::<StoreRegistry>()?;
            let author = registry
                .authors
                .find_by_id(author_id)
                .await
                .map_err(to_graphql_error)?;
            Ok(author.map(Author::from))
        })
        .await
    }

    /// Comments posted on this book
    async fn comments(&self, ctx: &Context<'_>) -> Option<Vec<Comment>> {
        nullable(ctx, async {
            let registry = ctx.data::<StoreRegistry>()?;
            let comments = registry
                .comments
                .find(&Filter::references(DbComment::BOOK_ID, self.inner.id))
                .await
                .map_err(to_graphql_error)?;
            Ok(Some(comments.into_iter().map(Comment::from).collect()))
        })
        .await
    }
}
