//! Bookmark repository; every operation is scoped to the owning user.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff::Timestamp;
use uuid::Uuid;

use super::Pagination;
use crate::model::{Bookmark, NewBookmark, UpdateBookmark};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for bookmark database operations.
///
/// Lookups take both the bookmark and the user identifier, so a row owned
/// by another user behaves exactly like a missing one.
pub trait BookmarkRepository {
    /// Inserts a new bookmark.
    fn create_bookmark(
        &mut self,
        new_bookmark: NewBookmark,
    ) -> impl Future<Output = PgResult<Bookmark>> + Send;

    /// Lists the bookmarks of a user, most recent first.
    fn list_user_bookmarks(
        &mut self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Bookmark>>> + Send;

    /// Finds a bookmark owned by the given user.
    fn find_user_bookmark(
        &mut self,
        bookmark_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Bookmark>>> + Send;

    /// Applies a partial update to a bookmark owned by the given user.
    ///
    /// Returns `None` if no such bookmark exists.
    fn update_user_bookmark(
        &mut self,
        bookmark_id: Uuid,
        user_id: Uuid,
        changes: UpdateBookmark,
    ) -> impl Future<Output = PgResult<Option<Bookmark>>> + Send;

    /// Deletes a bookmark owned by the given user.
    ///
    /// Returns whether a row was deleted.
    fn delete_user_bookmark(
        &mut self,
        bookmark_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<bool>> + Send;
}

impl BookmarkRepository for PgConnection {
    async fn create_bookmark(&mut self, new_bookmark: NewBookmark) -> PgResult<Bookmark> {
        use schema::bookmarks;

        let bookmark = diesel::insert_into(bookmarks::table)
            .values(&new_bookmark)
            .returning(Bookmark::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            bookmark_id = %bookmark.id,
            user_id = %bookmark.user_id,
            "Bookmark created"
        );

        Ok(bookmark)
    }

    async fn list_user_bookmarks(
        &mut self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> PgResult<Vec<Bookmark>> {
        use schema::bookmarks::{self, dsl};

        bookmarks::table
            .filter(dsl::user_id.eq(user_id))
            .order((dsl::created_at.desc(), dsl::id.desc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Bookmark::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_user_bookmark(
        &mut self,
        bookmark_id: Uuid,
        user_id: Uuid,
    ) -> PgResult<Option<Bookmark>> {
        use schema::bookmarks::{self, dsl};

        bookmarks::table
            .filter(dsl::id.eq(bookmark_id))
            .filter(dsl::user_id.eq(user_id))
            .select(Bookmark::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn update_user_bookmark(
        &mut self,
        bookmark_id: Uuid,
        user_id: Uuid,
        mut changes: UpdateBookmark,
    ) -> PgResult<Option<Bookmark>> {
        use schema::bookmarks::{self, dsl};

        // Always touching `updated_at` keeps the changeset non-empty.
        changes.updated_at = Some(jiff_diesel::Timestamp::from(Timestamp::now()));

        diesel::update(
            bookmarks::table
                .filter(dsl::id.eq(bookmark_id))
                .filter(dsl::user_id.eq(user_id)),
        )
        .set(&changes)
        .returning(Bookmark::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)
    }

    async fn delete_user_bookmark(&mut self, bookmark_id: Uuid, user_id: Uuid) -> PgResult<bool> {
        use schema::bookmarks::{self, dsl};

        let deleted = diesel::delete(
            bookmarks::table
                .filter(dsl::id.eq(bookmark_id))
                .filter(dsl::user_id.eq(user_id)),
        )
        .execute(self)
        .await
        .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}
