//! GraphQL mutations for Bookshelf
//!
//! This module contains all mutation resolvers, organized by domain. Every
//! mutation is a single store call: no input validation, last write wins,
//! and deletes never cascade to dependent records.

mod community;
mod library;

pub use community::CommunityMutation;
pub use library::LibraryMutation;

use async_graphql::MergedObject;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(LibraryMutation, CommunityMutation);
