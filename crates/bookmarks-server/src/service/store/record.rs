use std::fmt;

use bookmarks_postgres::model;
use jiff::Timestamp;
use uuid::Uuid;

/// Stored user, including the password hash.
///
/// The hash never leaves the server; response types copy every field
/// except this one.
#[derive(Clone, PartialEq)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl From<model::User> for UserRecord {
    fn from(user: model::User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at.into(),
            updated_at: user.updated_at.into(),
        }
    }
}

/// Stored bookmark.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<model::Bookmark> for BookmarkRecord {
    fn from(bookmark: model::Bookmark) -> Self {
        Self {
            id: bookmark.id,
            user_id: bookmark.user_id,
            title: bookmark.title,
            description: bookmark.description,
            link: bookmark.link,
            created_at: bookmark.created_at.into(),
            updated_at: bookmark.updated_at.into(),
        }
    }
}

/// Fields of a bookmark about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub title: String,
    pub description: Option<String>,
    pub link: String,
}

/// Partial bookmark update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkChanges {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub link: Option<String>,
}

impl BookmarkChanges {
    /// Applies the changes to a record in place.
    pub fn apply(self, bookmark: &mut BookmarkRecord) {
        if let Some(title) = self.title {
            bookmark.title = title;
        }
        if let Some(description) = self.description {
            bookmark.description = description;
        }
        if let Some(link) = self.link {
            bookmark.link = link;
        }
    }
}

impl From<BookmarkChanges> for model::UpdateBookmark {
    fn from(changes: BookmarkChanges) -> Self {
        Self {
            title: changes.title,
            description: changes.description,
            link: changes.link,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark() -> BookmarkRecord {
        let now = Timestamp::now();
        BookmarkRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Rust".to_owned(),
            description: None,
            link: "https://www.rust-lang.org".to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn changes_apply_only_present_fields() {
        let mut record = bookmark();
        let changes = BookmarkChanges {
            title: Some("Rust Book".to_owned()),
            description: Some(Some("The book".to_owned())),
            ..Default::default()
        };

        changes.apply(&mut record);
        assert_eq!(record.title, "Rust Book");
        assert_eq!(record.description.as_deref(), Some("The book"));
        assert_eq!(record.link, "https://www.rust-lang.org");
    }

    #[test]
    fn changes_clear_description() {
        let mut record = bookmark();
        record.description = Some("old".to_owned());

        BookmarkChanges::default().apply(&mut record);
        assert_eq!(record.description.as_deref(), Some("old"));

        let changes = BookmarkChanges {
            description: Some(None),
            ..Default::default()
        };
        changes.apply(&mut record);
        assert_eq!(record.description, None);
        assert_eq!(record.title, "Rust");
    }

    #[test]
    fn user_debug_redacts_hash() {
        let now = Timestamp::now();
        let user = UserRecord {
            id: Uuid::new_v4(),
            email: "a@b.com".to_owned(),
            password_hash: "$argon2id$secret".to_owned(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };

        let debug = format!("{user:?}");
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("$argon2id$secret"));
    }
}
