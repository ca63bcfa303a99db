//! GraphQL schema and resolvers for Bookshelf
//!
//! This module contains the async-graphql schema including:
//! - Object types for authors, books, users and comments, whose relation
//!   fields resolve lazily through the store registry
//! - Query resolvers for single lookups and full listings
//! - Mutation resolvers for add/update/delete of every entity kind

pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use schema::{build_schema, BookshelfSchema};

use std::future::Future;

use async_graphql::{Context, ErrorExtensions, MaybeUndefined, ID};
use uuid::Uuid;

use crate::error::ApiError;

/// Convert API errors to GraphQL field errors carrying a `code` extension
pub(crate) fn to_graphql_error(error: impl Into<ApiError>) -> async_graphql::Error {
    let error = error.into();
    error.log();

    let code = error.error_code();
    async_graphql::Error::new(error.public_message()).extend_with(|_, e| e.set("code", code))
}

/// Resolve a nullable field, reporting a failure as a field error and `null`
///
/// The error is recorded with this field's path and the field itself
/// resolves to null, so its key stays in the response and sibling fields
/// keep resolving.
pub(crate) async fn nullable<T>(
    ctx: &Context<'_>,
    field: impl Future<Output = async_graphql::Result<Option<T>>>,
) -> Option<T> {
    match field.await {
        Ok(value) => value,
        Err(err) => {
            ctx.add_error(ctx.set_error_path(err.into_server_error(ctx.item.pos)));
            None
        }
    }
}

/// Parse a GraphQL ID into a record id
pub(crate) fn parse_id(id: &ID) -> async_graphql::Result<Uuid> {
    Uuid::parse_str(id.as_str()).map_err(|_| to_graphql_error(ApiError::InvalidId(id.to_string())))
}

/// Parse an optional ID argument
pub(crate) fn parse_optional_id(id: Option<&ID>) -> async_graphql::Result<Option<Uuid>> {
    id.map(parse_id).transpose()
}

/// Parse an ID patch argument, keeping "not supplied" and `null` apart
pub(crate) fn parse_patch_id(id: MaybeUndefined<ID>) -> async_graphql::Result<MaybeUndefined<Uuid>> {
    Ok(match id {
        MaybeUndefined::Undefined => MaybeUndefined::Undefined,
        MaybeUndefined::Null => MaybeUndefined::Null,
        MaybeUndefined::Value(id) => MaybeUndefined::Value(parse_id(&id)?),
    })
}
