//! Comment GraphQL type

use async_graphql::{Context, Object, ID};
use chrono::{DateTime, Utc};

use crate::graphql::{nullable, to_graphql_error};
use crate::models::Comment as DbComment;
use crate::repositories::StoreRegistry;

use super::book::Book;
use super::user::User;

/// Comment exposed via GraphQL
pub struct Comment {
    inner: DbComment,
}

impl From<DbComment> for Comment {
    fn from(comment: DbComment) -> Self {
        Self { inner: comment }
    }
}

#[Object]
impl Comment {
    /// Unique comment identifier
    async fn id(&self) -> ID {
        ID::from(self.inner.id.to_string())
    }

    /// Comment headline
    async fn head(&self) -> Option<&str> {
        self.inner.head.as_deref()
    }

    /// Comment text
    async fn body(&self) -> Option<&str> {
        self.inner.body.as_deref()
    }

    async fn book_id(&self) -> Option<ID> {
        self.inner.book_id.map(|id| ID::from(id.to_string()))
    }

    async fn user_id(&self) -> Option<ID> {
        self.inner.user_id.map(|id| ID::from(id.to_string()))
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.inner.updated_at
    }

    // Relationship resolvers

    /// The commented book; null when unset or no longer present
    async fn book(&self, ctx: &Context<'_>) -> Option<Book> {
        let book_id = self.inner.book_id?;

        nullable(ctx, async {
            let registry = ctx.data::<StoreRegistry>()?;
            let book = registry
                .books
                .find_by_id(book_id)
                .await
                .map_err(to_graphql_error)?;
            Ok(book.map(Book::from))
        })
        .await
    }

    /// The commenting user; null when unset or no longer present
    async fn user(&self, ctx: &Context<'_>) -> Option<User> {
        let user_id = self.inner.user_id?;

        nullable(ctx, async {
            let registry = ctx.data::<StoreRegistry>()?;
            let user = registry
                .users
                .find_by_id(user_id)
                .await
                .map_err(to_graphql_error)?;
            Ok(user.map(User::from))
        })
        .await
    }
}
