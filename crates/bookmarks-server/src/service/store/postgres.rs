//! Store implementations backed by the connection pool.

use async_trait::async_trait;
use bookmarks_postgres::PgClient;
use bookmarks_postgres::model::{NewBookmark, NewUser};
use bookmarks_postgres::query::{BookmarkRepository, Pagination, UserRepository};
use uuid::Uuid;

use super::{
    BookmarkChanges, BookmarkDraft, BookmarkRecord, BookmarkStore, CredentialStore, StoreResult,
    UserRecord,
};

#[async_trait]
impl CredentialStore for PgClient {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let mut conn = self.get_connection().await?;
        let user = conn.find_user_by_email(email).await?;
        Ok(user.map(UserRecord::from))
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> StoreResult<Option<UserRecord>> {
        let mut conn = self.get_connection().await?;
        let user = conn.find_user_by_id(user_id).await?;
        Ok(user.map(UserRecord::from))
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<UserRecord> {
        let new_user = NewUser {
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            ..Default::default()
        };

        let mut conn = self.get_connection().await?;
        let user = conn.create_user(new_user).await?;
        Ok(user.into())
    }
}

#[async_trait]
impl BookmarkStore for PgClient {
    async fn list_bookmarks(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> StoreResult<Vec<BookmarkRecord>> {
        let mut conn = self.get_connection().await?;
        let bookmarks = conn.list_user_bookmarks(user_id, pagination).await?;
        Ok(bookmarks.into_iter().map(BookmarkRecord::from).collect())
    }

    async fn create_bookmark(
        &self,
        user_id: Uuid,
        draft: BookmarkDraft,
    ) -> StoreResult<BookmarkRecord> {
        let new_bookmark = NewBookmark {
            user_id,
            title: draft.title,
            description: draft.description,
            link: draft.link,
        };

        let mut conn = self.get_connection().await?;
        let bookmark = conn.create_bookmark(new_bookmark).await?;
        Ok(bookmark.into())
    }

    async fn find_bookmark(
        &self,
        user_id: Uuid,
        bookmark_id: Uuid,
    ) -> StoreResult<Option<BookmarkRecord>> {
        let mut conn = self.get_connection().await?;
        let bookmark = conn.find_user_bookmark(bookmark_id, user_id).await?;
        Ok(bookmark.map(BookmarkRecord::from))
    }

    async fn update_bookmark(
        &self,
        user_id: Uuid,
        bookmark_id: Uuid,
        changes: BookmarkChanges,
    ) -> StoreResult<Option<BookmarkRecord>> {
        let mut conn = self.get_connection().await?;
        let bookmark = conn
            .update_user_bookmark(bookmark_id, user_id, changes.into())
            .await?;
        Ok(bookmark.map(BookmarkRecord::from))
    }

    async fn delete_bookmark(&self, user_id: Uuid, bookmark_id: Uuid) -> StoreResult<bool> {
        let mut conn = self.get_connection().await?;
        let deleted = conn.delete_user_bookmark(bookmark_id, user_id).await?;
        Ok(deleted)
    }
}
