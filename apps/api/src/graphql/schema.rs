//! GraphQL schema builder for Bookshelf
//!
//! All object types are registered in one pass; the cyclic references
//! between them (Author ↔ Book, Book ↔ Comment, User ↔ Comment) are plain
//! Rust type references, so no deferred wiring is needed.

use async_graphql::{EmptySubscription, Schema};

use crate::repositories::StoreRegistry;

use super::mutation::Mutation;
use super::query::Query;

/// The Bookshelf GraphQL schema type
pub type BookshelfSchema = Schema<Query, Mutation, EmptySubscription>;

/// Create the GraphQL schema over the given store registry
pub fn build_schema(registry: StoreRegistry) -> BookshelfSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(registry)
        .finish()
}
