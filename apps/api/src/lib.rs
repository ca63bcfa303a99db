//! Bookshelf API library
//!
//! GraphQL CRUD API over authors, books, users and comments stored in a
//! document database. This module exposes the core components for the
//! binary and for integration tests.

pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod repositories;
pub mod routes;

// Re-export commonly used types
pub use config::{Config, StoreBackend};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use graphql::{build_schema, BookshelfSchema};
pub use repositories::{DocumentStore, MemoryDocumentStore, PgDocumentStore, StoreRegistry};
pub use routes::app_router;
