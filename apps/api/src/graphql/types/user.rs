//! User GraphQL type

use async_graphql::{Context, Object, ID};
use chrono::{DateTime, Utc};

use crate::graphql::{nullable, to_graphql_error};
use crate::models::{Comment as DbComment, User as DbUser};
use crate::repositories::{Filter, StoreRegistry};

use super::comment::Comment;

/// User exposed via GraphQL
pub struct User {
    inner: DbUser,
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self { inner: user }
    }
}

#[Object]
impl User {
    async fn id(&self) -> ID {
        ID::from(self.inner.id.to_string())
    }

    async fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.inner.updated_at
    }

    /// Comments written by this user
    async fn comments(&self, ctx: &Context<'_>) -> Option<Vec<Comment>> {
        nullable(ctx, async {
            let registry = ctx.data::<StoreRegistry>()?;
            let comments = registry
                .comments
                .find(&Filter::references(DbComment::USER_ID, self.inner.id))
                .await
                .map_err(to_graphql_error)?;
            Ok(Some(comments.into_iter().map(Comment::from).collect()))
        })
        .await
    }
}
