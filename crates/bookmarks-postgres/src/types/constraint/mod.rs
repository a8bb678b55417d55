//! Database constraint violations, one enum per table.

mod bookmarks;
mod users;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::bookmarks::BookmarkConstraints;
pub use self::users::UserConstraints;

/// Any constraint known to this crate, tagged with its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    User(UserConstraints),
    Bookmark(BookmarkConstraints),
}

impl ConstraintViolation {
    /// Parses a constraint name as reported by PostgreSQL.
    ///
    /// ```
    /// use bookmarks_postgres::types::ConstraintViolation;
    ///
    /// assert!(ConstraintViolation::new("users_email_unique_idx").is_some());
    /// assert!(ConstraintViolation::new("unknown_constraint").is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        match constraint.split('_').next()? {
            "users" => UserConstraints::new(constraint).map(Self::User),
            "bookmarks" => BookmarkConstraints::new(constraint).map(Self::Bookmark),
            _ => None,
        }
    }

    /// Returns the table the constraint belongs to.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::User(_) => "users",
            Self::Bookmark(_) => "bookmarks",
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(c) => fmt::Display::fmt(c, f),
            Self::Bookmark(c) => fmt::Display::fmt(c, f),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("unknown constraint: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_constraints() {
        assert_eq!(
            ConstraintViolation::new("users_email_unique_idx"),
            Some(ConstraintViolation::User(UserConstraints::EmailUnique))
        );
        assert_eq!(
            ConstraintViolation::new("bookmarks_user_id_fkey"),
            Some(ConstraintViolation::Bookmark(BookmarkConstraints::UserReference))
        );
    }

    #[test]
    fn rejects_unknown_constraints() {
        assert_eq!(ConstraintViolation::new("users_unknown"), None);
        assert_eq!(ConstraintViolation::new("accounts_email_unique_idx"), None);
        assert_eq!(ConstraintViolation::new(""), None);
    }

    #[test]
    fn reports_table_and_name() {
        let violation = ConstraintViolation::User(UserConstraints::EmailUnique);
        assert_eq!(violation.table_name(), "users");
        assert_eq!(violation.to_string(), "users_email_unique_idx");

        let violation = ConstraintViolation::Bookmark(BookmarkConstraints::TitleLength);
        assert_eq!(violation.table_name(), "bookmarks");
    }
}
