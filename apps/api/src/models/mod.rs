//! Document models for Bookshelf
//!
//! Each entity has three shapes:
//! - the stored record (`Author`, `Book`, ...), as read back from the store
//! - a creation input (`NewAuthor`, ...), fields omitted when not supplied
//! - a patch (`AuthorPatch`, ...), where every field tracks whether it was
//!   supplied at all, so `null` can be told apart from "leave untouched"
//!
//! Stored field names are camelCase, matching the GraphQL surface.

pub mod author;
pub mod book;
pub mod comment;
pub mod user;

pub use author::{Author, AuthorPatch, NewAuthor};
pub use book::{Book, BookPatch, NewBook};
pub use comment::{Comment, CommentPatch, NewComment};
pub use user::{NewUser, User, UserPatch};
