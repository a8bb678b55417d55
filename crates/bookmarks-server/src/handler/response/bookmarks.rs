//! Bookmark responses.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::store::BookmarkRecord;

/// Bookmark owned by the authenticated user.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Page of bookmarks, newest first.
pub type Bookmarks = Vec<Bookmark>;

impl Bookmark {
    pub fn from_records(records: Vec<BookmarkRecord>) -> Bookmarks {
        records.into_iter().map(Self::from).collect()
    }
}

impl From<BookmarkRecord> for Bookmark {
    fn from(bookmark: BookmarkRecord) -> Self {
        Self {
            id: bookmark.id,
            user_id: bookmark.user_id,
            title: bookmark.title,
            description: bookmark.description,
            link: bookmark.link,
            created_at: bookmark.created_at,
            updated_at: bookmark.updated_at,
        }
    }
}
