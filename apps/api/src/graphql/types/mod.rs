//! GraphQL type definitions for Bookshelf
//!
//! Each object wraps its stored record. Scalar fields pass the stored value
//! through; relation fields issue one store call per parent record:
//! - "has many" relations list the child collection filtered on a foreign
//!   key equal to the parent id
//! - "belongs to" relations look the parent's foreign key up by id, and
//!   resolve to null when the key is unset or dangling
//!
//! Relation and root fields are nullable: a failed store call nulls only
//! the field that issued it and the rest of the response still resolves.

mod author;
mod book;
mod comment;
mod user;

pub use author::Author;
pub use book::Book;
pub use comment::Comment;
pub use user::User;
