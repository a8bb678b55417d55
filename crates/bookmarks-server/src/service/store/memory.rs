//! In-memory stores for tests; no database required.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bookmarks_postgres::query::Pagination;
use bookmarks_postgres::types::{ConstraintViolation, UserConstraints};
use jiff::{SignedDuration, Timestamp};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    BookmarkChanges, BookmarkDraft, BookmarkRecord, BookmarkStore, CredentialStore, StoreError,
    StoreResult, UserRecord, normalize_email,
};

/// Credential and bookmark store kept in process memory.
///
/// Mirrors the database semantics that callers rely on: normalized unique
/// emails, per-user scoping and newest-first listing. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    users: RwLock<HashMap<Uuid, UserRecord>>,
    bookmarks: RwLock<HashMap<Uuid, BookmarkRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    pub async fn user_count(&self) -> usize {
        self.inner.users.read().await.len()
    }

    /// Removes a user together with their bookmarks.
    pub async fn delete_user(&self, user_id: Uuid) -> bool {
        let removed = self.inner.users.write().await.remove(&user_id).is_some();
        self.inner
            .bookmarks
            .write()
            .await
            .retain(|_, bookmark| bookmark.user_id != user_id);
        removed
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let email = normalize_email(email);
        let users = self.inner.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> StoreResult<Option<UserRecord>> {
        Ok(self.inner.users.read().await.get(&user_id).cloned())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<UserRecord> {
        let email = normalize_email(email);
        let mut users = self.inner.users.write().await;

        if users.values().any(|user| user.email == email) {
            return Err(StoreError::Constraint(ConstraintViolation::User(
                UserConstraints::EmailUnique,
            )));
        }

        let now = Timestamp::now();
        let user = UserRecord {
            id: Uuid::new_v4(),
            email,
            password_hash: password_hash.to_owned(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn list_bookmarks(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> StoreResult<Vec<BookmarkRecord>> {
        let bookmarks = self.inner.bookmarks.read().await;
        let mut owned: Vec<_> = bookmarks
            .values()
            .filter(|bookmark| bookmark.user_id == user_id)
            .cloned()
            .collect();

        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let offset = usize::try_from(pagination.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit).unwrap_or(0);
        Ok(owned.into_iter().skip(offset).take(limit).collect())
    }

    async fn create_bookmark(
        &self,
        user_id: Uuid,
        draft: BookmarkDraft,
    ) -> StoreResult<BookmarkRecord> {
        let mut bookmarks = self.inner.bookmarks.write().await;

        // Creation times stay strictly increasing so newest-first is total.
        let mut now = Timestamp::now();
        if let Some(latest) = bookmarks.values().map(|b| b.created_at).max()
            && now <= latest
        {
            now = latest.checked_add(SignedDuration::from_nanos(1)).unwrap_or(now);
        }

        let bookmark = BookmarkRecord {
            id: Uuid::new_v4(),
            user_id,
            title: draft.title,
            description: draft.description,
            link: draft.link,
            created_at: now,
            updated_at: now,
        };

        bookmarks.insert(bookmark.id, bookmark.clone());
        Ok(bookmark)
    }

    async fn find_bookmark(
        &self,
        user_id: Uuid,
        bookmark_id: Uuid,
    ) -> StoreResult<Option<BookmarkRecord>> {
        let bookmarks = self.inner.bookmarks.read().await;
        Ok(bookmarks
            .get(&bookmark_id)
            .filter(|bookmark| bookmark.user_id == user_id)
            .cloned())
    }

    async fn update_bookmark(
        &self,
        user_id: Uuid,
        bookmark_id: Uuid,
        changes: BookmarkChanges,
    ) -> StoreResult<Option<BookmarkRecord>> {
        let mut bookmarks = self.inner.bookmarks.write().await;
        let Some(bookmark) = bookmarks
            .get_mut(&bookmark_id)
            .filter(|bookmark| bookmark.user_id == user_id)
        else {
            return Ok(None);
        };

        changes.apply(bookmark);
        bookmark.updated_at = Timestamp::now();
        Ok(Some(bookmark.clone()))
    }

    async fn delete_bookmark(&self, user_id: Uuid, bookmark_id: Uuid) -> StoreResult<bool> {
        let mut bookmarks = self.inner.bookmarks.write().await;
        let owned = bookmarks
            .get(&bookmark_id)
            .is_some_and(|bookmark| bookmark.user_id == user_id);

        if owned {
            bookmarks.remove(&bookmark_id);
        }

        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> BookmarkDraft {
        BookmarkDraft {
            title: title.to_owned(),
            description: None,
            link: "https://example.com".to_owned(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store.create_user("a@b.com", "hash").await?;

        let result = store.create_user("  A@B.com ", "hash").await;
        assert!(matches!(
            result,
            Err(StoreError::Constraint(ConstraintViolation::User(
                UserConstraints::EmailUnique
            )))
        ));
        assert_eq!(store.user_count().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn email_lookup_is_normalized() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let user = store.create_user("Alice@Example.com", "hash").await?;

        assert_eq!(user.email, "alice@example.com");
        let found = store.find_user_by_email(" ALICE@example.com").await?;
        assert_eq!(found.map(|u| u.id), Some(user.id));
        Ok(())
    }

    #[tokio::test]
    async fn bookmarks_are_scoped_to_owner() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let bookmark = store.create_bookmark(owner, draft("mine")).await?;

        assert!(store.find_bookmark(other, bookmark.id).await?.is_none());
        assert!(
            store
                .update_bookmark(other, bookmark.id, BookmarkChanges::default())
                .await?
                .is_none()
        );
        assert!(!store.delete_bookmark(other, bookmark.id).await?);
        assert!(store.find_bookmark(owner, bookmark.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn list_is_paginated() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        for title in ["a", "b", "c"] {
            store.create_bookmark(owner, draft(title)).await?;
        }

        let page = store.list_bookmarks(owner, Pagination::new(2, 0)).await?;
        assert_eq!(page.len(), 2);
        let rest = store.list_bookmarks(owner, Pagination::new(2, 2)).await?;
        assert_eq!(rest.len(), 1);
        assert!(page[0].created_at >= page[1].created_at);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_user_removes_bookmarks() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let user = store.create_user("a@b.com", "hash").await?;
        store.create_bookmark(user.id, draft("a")).await?;

        assert!(store.delete_user(user.id).await);
        let remaining = store.list_bookmarks(user.id, Pagination::default()).await?;
        assert!(remaining.is_empty());
        Ok(())
    }
}
