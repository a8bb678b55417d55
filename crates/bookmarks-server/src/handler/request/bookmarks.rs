//! Bookmark request types.

use bookmarks_postgres::query::{DEFAULT_PAGE_SIZE, Pagination};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::service::store::{BookmarkChanges, BookmarkDraft};

/// Request payload for creating a bookmark.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookmark {
    /// Title of the bookmark.
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    /// Link the bookmark points to.
    #[validate(url)]
    #[validate(length(max = 2048))]
    pub link: String,

    /// Optional free-form description.
    #[validate(length(max = 2048))]
    pub description: Option<String>,
}

impl From<CreateBookmark> for BookmarkDraft {
    fn from(request: CreateBookmark) -> Self {
        Self {
            title: request.title,
            description: request.description,
            link: request.link,
        }
    }
}

/// Request payload for editing a bookmark.
///
/// Absent fields stay unchanged. An explicit `"description": null`
/// clears the description.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBookmark {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,

    #[validate(url)]
    #[validate(length(max = 2048))]
    pub link: Option<String>,

    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = 2048))]
    pub description: Option<Option<String>>,
}

/// Marks a field as present, so `null` becomes `Some(None)` while an
/// absent field keeps its `None` default.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateBookmark> for BookmarkChanges {
    fn from(request: UpdateBookmark) -> Self {
        Self {
            title: request.title,
            description: request.description,
            link: request.link,
        }
    }
}

/// Query parameters of the bookmark listing.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListBookmarks {
    /// Number of bookmarks to skip.
    pub offset: Option<i64>,
    /// Maximum number of bookmarks to return, clamped to `1..=1000`.
    pub limit: Option<i64>,
}

impl From<ListBookmarks> for Pagination {
    fn from(query: ListBookmarks) -> Self {
        Self::new(
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            query.offset.unwrap_or_default(),
        )
    }
}
