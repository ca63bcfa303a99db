//! Community queries for Bookshelf GraphQL API
//!
//! - Users: look up by id, list all
//! - Comments: look up by id, list all

use async_graphql::{Context, Object, ID};

use crate::graphql::types::{Comment, User};
use crate::graphql::{nullable, parse_optional_id, to_graphql_error};
use crate::repositories::StoreRegistry;

/// Queries over users and their comments
#[derive(Default)]
pub struct CommunityQuery;

#[Object]
impl CommunityQuery {
    /// Get a user by ID; null when no user has that ID
    async fn user(&self, ctx: &Context<'_>, id: Option<ID>) -> Option<User> {
        nullable(ctx, async {
            let Some(id) = parse_optional_id(id.as_ref())? else {
                return Ok(None);
            };
            let registry = ctx.data::<StoreRegistry>()?;
            let user = registry
                .users
                .find_by_id(id)
                .await
                .map_err(to_graphql_error)?;
            Ok(user.map(User::from))
        })
        .await
    }

    /// List all users
    async fn users(&self, ctx: &Context<'_>) -> Option<Vec<User>> {
        nullable(ctx, async {
            let registry = ctx.data::<StoreRegistry>()?;
            let users = registry.users.find_all().await.map_err(to_graphql_error)?;
            Ok(Some(users.into_iter().map(User::from).collect()))
        })
        .await
    }

    /// Get a comment by ID; null when no comment has that ID
    async fn comment(&self, ctx: &Context<'_>, id: Option<ID>) -> Option<Comment> {
        nullable(ctx, async {
            let Some(id) = parse_optional_id(id.as_ref())? else {
                return Ok(None);
            };
            let registry = ctx.data::<StoreRegistry>()?;
            let comment = registry
                .comments
                .find_by_id(id)
                .await
                .map_err(to_graphql_error)?;
            Ok(comment.map(Comment::from))
        })
        .await
    }

    /// List all comments
    async fn comments(&self, ctx: &Context<'_>) -> Option<Vec<Comment>> {
        nullable(ctx, async {
            let registry = ctx.data::<StoreRegistry>()?;
            let comments = registry.comments.find_all().await.map_err(to_graphql_error)?;
            Ok(Some(comments.into_iter().map(Comment::from).collect()))
        })
        .await
    }
}
