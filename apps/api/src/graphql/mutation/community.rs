//! Community mutations for Bookshelf GraphQL API
//!
//! - addUser / updateUser / deleteUser
//! - addComment / updateComment / deleteComment

use async_graphql::{Context, MaybeUndefined, Object, ID};

use crate::graphql::types::{Comment, User};
use crate::graphql::{nullable, parse_id, parse_patch_id, to_graphql_error};
use crate::models::{CommentPatch, NewComment, NewUser, UserPatch};
use crate::repositories::StoreRegistry;

/// Mutations over users and comments
#[derive(Default)]
pub struct CommunityMutation;

#[Object]
impl CommunityMutation {
    // ==================== User Mutations ====================

    /// Create a new user
    async fn add_user(&self, ctx: &Context<'_>, name: Option<String>) -> Option<User> {
        nullable(ctx, async {
            let registry = ctx.data::<StoreRegistry>()?;
            let user = registry
                .users
                .insert(&NewUser { name })
                .await
                .map_err(to_graphql_error)?;

            tracing::info!(user_id = %user.id, "User added");
            Ok(Some(User::from(user)))
        })
        .await
    }

    /// Update a user's name; null when the user does not exist
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: MaybeUndefined<String>,
    ) -> Option<User> {
        nullable(ctx, async {
            let id = parse_id(&id)?;
            let registry = ctx.data::<StoreRegistry>()?;
            let user = registry
                .users
                .update_by_id(id, &UserPatch { name })
                .await
                .map_err(to_graphql_error)?;
            Ok(user.map(User::from))
        })
        .await
    }

    /// Delete a user and return it; the user's comments are kept
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Option<User> {
        nullable(ctx, async {
            let id = parse_id(&id)?;
            let registry = ctx.data::<StoreRegistry>()?;
            let user = registry
                .users
                .delete_by_id(id)
                .await
                .map_err(to_graphql_error)?;

            if user.is_some() {
                tracing::info!(user_id = %id, "User deleted");
            }
            Ok(user.map(User::from))
        })
        .await
    }

    // ==================== Comment Mutations ====================

    /// Post a comment by a user on a book
    ///
    /// The referenced book and user are not checked for existence.
    async fn add_comment(
        &self,
        ctx: &Context<'_>,
        head: Option<String>,
        body: Option<String>,
        book_id: ID,
        user_id: ID,
    ) -> Option<Comment> {
        nullable(ctx, async {
            let input = NewComment {
                head,
                body,
                book_id: Some(parse_id(&book_id)?),
                user_id: Some(parse_id(&user_id)?),
            };

            let registry = ctx.data::<StoreRegistry>()?;
            let comment = registry
                .comments
                .insert(&input)
                .await
                .map_err(to_graphql_error)?;

            tracing::info!(comment_id = %comment.id, "Comment added");
            Ok(Some(Comment::from(comment)))
        })
        .await
    }

    /// Update the supplied fields of a comment; null when the comment does not exist
    async fn update_comment(
        &self,
        ctx: &Context<'_>,
        id: ID,
        head: MaybeUndefined<String>,
        body: MaybeUndefined<String>,
        book_id: MaybeUndefined<ID>,
        user_id: MaybeUndefined<ID>,
    ) -> Option<Comment> {
        nullable(ctx, async {
            let id = parse_id(&id)?;
            let patch = CommentPatch {
                head,
                body,
                book_id: parse_patch_id(book_id)?,
                user_id: parse_patch_id(user_id)?,
            };

            let registry = ctx.data::<StoreRegistry>()?;
            let comment = registry
                .comments
                .update_by_id(id, &patch)
                .await
                .map_err(to_graphql_error)?;
            Ok(comment.map(Comment::from))
        })
        .await
    }

    /// Delete a comment and return it; null when the comment does not exist
    async fn delete_comment(&self, ctx: &Context<'_>, id: ID) -> Option<Comment> {
        nullable(ctx, async {
            let id = parse_id(&id)?;
            let registry = ctx.data::<StoreRegistry>()?;
            let comment = registry
                .comments
                .delete_by_id(id)
                .await
                .map_err(to_graphql_error)?;
            Ok(comment.map(Comment::from))
        })
        .await
    }
}
