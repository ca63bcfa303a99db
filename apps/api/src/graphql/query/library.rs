//! Library queries for Bookshelf GraphQL API
//!
//! - Authors: look up by id, list all
//! - Books: look up by id, list all

use async_graphql::{Context, Object, ID};

use crate::graphql::types::{Author, Book};
use crate::graphql::{nullable, parse_optional_id, to_graphql_error};
use crate::repositories::StoreRegistry;

/// Library-related queries for authors and books
#[derive(Default)]
pub struct LibraryQuery;

#[Object]
impl LibraryQuery {
    // ==================== Author Queries ====================

    /// Get an author by ID; null when no author has that ID
    async fn author(&self, ctx: &Context<'_>, id: Option<ID>) -> Option<Author> {
        nullable(ctx, async {
            let Some(id) = parse_optional_id(id.as_ref())? else {
                return Ok(None);
            };
            let registry = ctx.data::<StoreRegistry>()?;
            let author = registry
                .authors
                .find_by_id(id)
                .await
                .map_err(to_graphql_error)?;
            Ok(author.map(Author::from))
        })
        .await
    }

    /// List all authors
    async fn authors(&self, ctx: &Context<'_>) -> Option<Vec<Author>> {
        nullable(ctx, async {
            let registry = ctx.data::<StoreRegistry>()?;
            let authors = registry.authors.find_all().await.map_err(to_graphql_error)?;
            Ok(Some(authors.into_iter().map(Author::from).collect()))
        })
        .await
    }

    // ==================== Book Queries ====================

    /// Get a book by ID; null when no book has that ID
    async fn book(&self, ctx: &Context<'_>, id: Option<ID>) -> Option<Book> {
        nullable(ctx, async {
            let Some(id) = parse_optional_id(id.as_ref())? else {
                return Ok(None);
            };
            let registry = ctx.data::<StoreRegistry>()?;
            let book = registry
                .books
                .find_by_id(id)
                .await
                .map_err(to_graphql_error)?;
            Ok(book.map(Book::from))
        })
        .await
    }

    /// List all books
    async fn books(&self, ctx: &Context<'_>) -> Option<Vec<Book>> {
        nullable(ctx, async {
            let registry = ctx.data::<StoreRegistry>()?;
            let books = registry.books.find_all().await.map_err(to_graphql_error)?;
            Ok(Some(books.into_iter().map(Book::from).collect()))
        })
        .await
    }
}
