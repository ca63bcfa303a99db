//! GraphQL queries for Bookshelf
//!
//! This module contains all query resolvers, organized by domain.

mod community;
mod library;

pub use community::CommunityQuery;
pub use library::LibraryQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(LibraryQuery, CommunityQuery);
