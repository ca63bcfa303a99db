//! Library mutations for Bookshelf GraphQL API
//!
//! - addAuthor / updateAuthor / deleteAuthor
//! - addBook / updateBook / deleteBook
//!
//! Deleting an author leaves its books in place; their `author` field
//! resolves to null from then on.

use async_graphql::{Context, MaybeUndefined, Object, ID};

use crate::graphql::types::{Author, Book};
use crate::graphql::{
    nullable, parse_id, parse_optional_id, parse_patch_id, to_graphql_error,
};
use crate::models::{AuthorPatch, BookPatch, NewAuthor, NewBook};
use crate::repositories::StoreRegistry;

/// Mutations over authors and books
#[derive(Default)]
pub struct LibraryMutation;

#[Object]
impl LibraryMutation {
    // ==================== Author Mutations ====================

    /// Create a new author
    async fn add_author(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
        country: Option<String>,
    ) -> Option<Author> {
        nullable(ctx, async {
            let registry = ctx.data::<StoreRegistry>()?;
            let author = registry
                .authors
                .insert(&NewAuthor { name, country })
                .await
                .map_err(to_graphql_error)?;

            tracing::info!(author_id = %author.id, "Author added");
            Ok(Some(Author::from(author)))
        })
        .await
    }

    /// Update the supplied fields of an author; null when the author does not exist
    async fn update_author(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: MaybeUndefined<String>,
        country: MaybeUndefined<String>,
    ) -> Option<Author> {
        nullable(ctx, async {
            let id = parse_id(&id)?;
            let registry = ctx.data::<StoreRegistry>()?;
            let author = registry
                .authors
                .update_by_id(id, &AuthorPatch { name, country })
                .await
                .map_err(to_graphql_error)?;
            Ok(author.map(Author::from))
        })
        .await
    }

    /// Delete an author and return it; null when the author does not exist
    async fn delete_author(&self, ctx: &Context<'_>, id: ID) -> Option<Author> {
        nullable(ctx, async {
            let id = parse_id(&id)?;
            let registry = ctx.data::<StoreRegistry>()?;
            let author = registry
                .authors
                .delete_by_id(id)
                .await
                .map_err(to_graphql_error)?;

            if author.is_some() {
                tracing::info!(author_id = %id, "Author deleted");
            }
            Ok(author.map(Author::from))
        })
        .await
    }

    // ==================== Book Mutations ====================

    /// Create a new book, optionally pointing at an author
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: Option<String>,
        author_id: Option<ID>,
    ) -> Option<Book> {
        nullable(ctx, async {
            let author_id = parse_optional_id(author_id.as_ref())?;
            let registry = ctx.data::<StoreRegistry>()?;
            let book = registry
                .books
                .insert(&NewBook { title, author_id })
                .await
                .map_err(to_graphql_error)?;

            tracing::info!(book_id = %book.id, "Book added");
            Ok(Some(Book::from(book)))
        })
        .await
    }

    /// Update the supplied fields of a book; null when the book does not exist
    async fn update_book(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: MaybeUndefined<String>,
        author_id: MaybeUndefined<ID>,
    ) -> Option<Book> {
        nullable(ctx, async {
            let id = parse_id(&id)?;
            let patch = BookPatch {
                title,
                author_id: parse_patch_id(author_id)?,
            };

            let registry = ctx.data::<StoreRegistry>()?;
            let book = registry
                .books
                .update_by_id(id, &patch)
                .await
                .map_err(to_graphql_error)?;
            Ok(book.map(Book::from))
        })
        .await
    }

    /// Delete a book and return it; its comments are kept
    async fn delete_book(&self, ctx: &Context<'_>, id: ID) -> Option<Book> {
        nullable(ctx, async {
            let id = parse_id(&id)?;
            let registry = ctx.data::<StoreRegistry>()?;
            let book = registry
                .books
                .delete_by_id(id)
                .await
                .map_err(to_graphql_error)?;

            if book.is_some() {
                tracing::info!(book_id = %id, "Book deleted");
            }
            Ok(book.map(Book::from))
        })
        .await
    }
}
