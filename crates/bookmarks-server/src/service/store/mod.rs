//! Persistence seams for credentials and bookmarks.
//!
//! Handlers and the [`AuthService`] only see the [`CredentialStore`] and
//! [`BookmarkStore`] traits. [`PgClient`] implements both for production,
//! and [`MemoryStore`] implements both for tests.
//!
//! [`AuthService`]: crate::service::AuthService
//! [`PgClient`]: bookmarks_postgres::PgClient

#[cfg(any(test, feature = "test-utils"))]
mod memory;
mod postgres;
mod record;

use async_trait::async_trait;
use bookmarks_postgres::PgError;
use bookmarks_postgres::query::Pagination;
use bookmarks_postgres::types::ConstraintViolation;
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use self::memory::MemoryStore;
pub use self::record::{BookmarkChanges, BookmarkDraft, BookmarkRecord, UserRecord};

/// Error returned by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness, validation or reference constraint was violated.
    #[error("constraint violated: {0}")]
    Constraint(ConstraintViolation),
    /// Any other database failure.
    #[error(transparent)]
    Postgres(PgError),
}

impl From<PgError> for StoreError {
    fn from(error: PgError) -> Self {
        match error.constraint_violation() {
            Some(constraint) => Self::Constraint(constraint),
            None => Self::Postgres(error),
        }
    }
}

/// Specialized [`Result`] type for store operations.
pub type StoreResult<T, E = StoreError> = Result<T, E>;

/// User records keyed by email.
///
/// Emails are normalized (trimmed, lowercased) by the store, so lookups
/// are case-insensitive. Creating a user with a taken email fails with
/// [`UserConstraints::EmailUnique`].
///
/// [`UserConstraints::EmailUnique`]: bookmarks_postgres::types::UserConstraints::EmailUnique
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;

    async fn find_user_by_id(&self, user_id: Uuid) -> StoreResult<Option<UserRecord>>;

    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<UserRecord>;
}

/// Bookmarks scoped by their owning user.
///
/// Every operation takes the owner's identifier; a bookmark owned by
/// someone else is indistinguishable from a missing one.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Lists the user's bookmarks, most recent first.
    async fn list_bookmarks(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> StoreResult<Vec<BookmarkRecord>>;

    async fn create_bookmark(
        &self,
        user_id: Uuid,
        draft: BookmarkDraft,
    ) -> StoreResult<BookmarkRecord>;

    async fn find_bookmark(
        &self,
        user_id: Uuid,
        bookmark_id: Uuid,
    ) -> StoreResult<Option<BookmarkRecord>>;

    /// Returns `None` if the user owns no such bookmark.
    async fn update_bookmark(
        &self,
        user_id: Uuid,
        bookmark_id: Uuid,
        changes: BookmarkChanges,
    ) -> StoreResult<Option<BookmarkRecord>>;

    /// Returns whether a bookmark was deleted.
    async fn delete_bookmark(&self, user_id: Uuid, bookmark_id: Uuid) -> StoreResult<bool>;
}

/// Normalizes an email the same way the database layer does.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use bookmarks_postgres::types::UserConstraints;

    use super::*;

    #[test]
    fn pg_error_without_constraint_stays_postgres() {
        let error = StoreError::from(PgError::Unexpected("boom".into()));
        assert!(matches!(error, StoreError::Postgres(_)));
    }

    #[test]
    fn constraint_error_display() {
        let error = StoreError::Constraint(ConstraintViolation::User(UserConstraints::EmailUnique));
        assert!(error.to_string().contains("users_email_unique_idx"));
    }
}
