//! Database models for all tables.
//!
//! Each table has a `Queryable` read model and an `Insertable` model for
//! creation. Mutable rows also get an `AsChangeset` update model.

mod bookmark;
mod user;

pub use bookmark::{Bookmark, NewBookmark, UpdateBookmark};
pub use user::{NewUser, User};
