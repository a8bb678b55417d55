use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::bookmarks;

/// Bookmark owned by a single user.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Bookmark {
    /// Unique bookmark identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Display title (1-256 characters).
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Target URL.
    pub link: String,
    /// Timestamp when the bookmark was created.
    pub created_at: Timestamp,
    /// Timestamp when the bookmark was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new bookmark.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewBookmark {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
}

/// Partial update of a bookmark; `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateBookmark {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub link: Option<String>,
    pub updated_at: Option<Timestamp>,
}
