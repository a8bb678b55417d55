//! Bookmark handlers scoped to the authenticated user.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;

use crate::extract::{AuthUser, Json, Path, Query, ValidateJson};
use crate::handler::request::{BookmarkPathParams, CreateBookmark, ListBookmarks, UpdateBookmark};
use crate::handler::response::{Bookmark, Bookmarks};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{BookmarkStore, ServiceState};

/// Tracing target for bookmark operations.
const TRACING_TARGET: &str = "bookmarks_server::handler::bookmarks";

fn bookmark_not_found() -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Bookmark not found")
        .with_resource("bookmark")
}

/// Lists the caller's bookmarks, newest first.
#[tracing::instrument(skip_all)]
async fn list_bookmarks(
    State(bookmark_store): State<Arc<dyn BookmarkStore>>,
    auth_user: AuthUser,
    Query(query): Query<ListBookmarks>,
) -> Result<(StatusCode, Json<Bookmarks>)> {
    let bookmarks = bookmark_store
        .list_bookmarks(auth_user.id(), query.into())
        .await?;

    tracing::debug!(
        target: TRACING_TARGET,
        user_id = %auth_user.id(),
        count = bookmarks.len(),
        "listed bookmarks"
    );

    Ok((StatusCode::OK, Json(Bookmark::from_records(bookmarks))))
}

/// Creates a bookmark owned by the caller.
#[tracing::instrument(skip_all)]
async fn create_bookmark(
    State(bookmark_store): State<Arc<dyn BookmarkStore>>,
    auth_user: AuthUser,
    ValidateJson(request): ValidateJson<CreateBookmark>,
) -> Result<(StatusCode, Json<Bookmark>)> {
    let bookmark = bookmark_store
        .create_bookmark(auth_user.id(), request.into())
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %auth_user.id(),
        bookmark_id = %bookmark.id,
        "bookmark created"
    );

    Ok((StatusCode::CREATED, Json(bookmark.into())))
}

/// Returns one of the caller's bookmarks.
#[tracing::instrument(skip_all)]
async fn get_bookmark(
    State(bookmark_store): State<Arc<dyn BookmarkStore>>,
    auth_user: AuthUser,
    Path(path_params): Path<BookmarkPathParams>,
) -> Result<(StatusCode, Json<Bookmark>)> {
    let bookmark = bookmark_store
        .find_bookmark(auth_user.id(), path_params.bookmark_id)
        .await?
        .ok_or_else(bookmark_not_found)?;

    Ok((StatusCode::OK, Json(bookmark.into())))
}

/// Applies a partial update to one of the caller's bookmarks.
#[tracing::instrument(skip_all)]
async fn update_bookmark(
    State(bookmark_store): State<Arc<dyn BookmarkStore>>,
    auth_user: AuthUser,
    Path(path_params): Path<BookmarkPathParams>,
    ValidateJson(request): ValidateJson<UpdateBookmark>,
) -> Result<(StatusCode, Json<Bookmark>)> {
    let bookmark = bookmark_store
        .update_bookmark(auth_user.id(), path_params.bookmark_id, request.into())
        .await?
        .ok_or_else(bookmark_not_found)?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %auth_user.id(),
        bookmark_id = %bookmark.id,
        "bookmark updated"
    );

    Ok((StatusCode::OK, Json(bookmark.into())))
}

/// Deletes one of the caller's bookmarks.
#[tracing::instrument(skip_all)]
async fn delete_bookmark(
    State(bookmark_store): State<Arc<dyn BookmarkStore>>,
    auth_user: AuthUser,
    Path(path_params): Path<BookmarkPathParams>,
) -> Result<StatusCode> {
    let deleted = bookmark_store
        .delete_bookmark(auth_user.id(), path_params.bookmark_id)
        .await?;

    if !deleted {
        return Err(bookmark_not_found());
    }

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %auth_user.id(),
        bookmark_id = %path_params.bookmark_id,
        "bookmark deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmarks/{bookmark_id}",
            get(get_bookmark)
                .patch(update_bookmark)
                .delete(delete_bookmark),
        )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use uuid::Uuid;

    use crate::handler::response::Bookmark;
    use crate::handler::test::{create_test_server, signup};

    #[tokio::test]
    async fn bookmark_lifecycle() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let token = signup(&server, "a@b.com").await;

        let list: Vec<Bookmark> = server.get("/bookmarks").authorization_bearer(&token).await.json();
        assert!(list.is_empty());

        let response = server
            .post("/bookmarks")
            .authorization_bearer(&token)
            .json(&json!({ "title": "Rust", "link": "https://www.rust-lang.org" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Bookmark = response.json();
        assert_eq!(created.title, "Rust");
        assert_eq!(created.description, None);

        let list: Vec<Bookmark> = server.get("/bookmarks").authorization_bearer(&token).await.json();
        assert_eq!(list.len(), 1);

        let path = format!("/bookmarks/{}", created.id);
        let found: Bookmark = server.get(&path).authorization_bearer(&token).await.json();
        assert_eq!(found.id, created.id);

        let response = server
            .patch(&path)
            .authorization_bearer(&token)
            .json(&json!({ "title": "Tokio", "link": "https://tokio.rs" }))
            .await;
        response.assert_status_ok();
        let updated: Bookmark = response.json();
        assert_eq!(updated.title, "Tokio");
        assert_eq!(updated.link, "https://tokio.rs");

        server
            .delete(&path)
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&path)
            .authorization_bearer(&token)
            .await
            .assert_status_not_found();

        server
            .delete(&path)
            .authorization_bearer(&token)
            .await
            .assert_status_not_found();

        Ok(())
    }

    #[tokio::test]
    async fn patch_null_clears_description() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let token = signup(&server, "a@b.com").await;

        let created: Bookmark = server
            .post("/bookmarks")
            .authorization_bearer(&token)
            .json(&json!({ "title": "Rust", "link": "https://www.rust-lang.org", "description": "d" }))
            .await
            .json();
        assert_eq!(created.description.as_deref(), Some("d"));
        let path = format!("/bookmarks/{}", created.id);

        let renamed: Bookmark = server
            .patch(&path)
            .authorization_bearer(&token)
            .json(&json!({ "title": "Rust Lang" }))
            .await
            .json();
        assert_eq!(renamed.description.as_deref(), Some("d"));

        let response = server
            .patch(&path)
            .authorization_bearer(&token)
            .json(&json!({ "description": null }))
            .await;
        response.assert_status_ok();
        let cleared: Bookmark = response.json();
        assert_eq!(cleared.description, None);
        assert_eq!(cleared.title, "Rust Lang");

        let found: Bookmark = server.get(&path).authorization_bearer(&token).await.json();
        assert_eq!(found.description, None);

        Ok(())
    }

    #[tokio::test]
    async fn bookmarks_are_scoped_to_owner() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let owner = signup(&server, "a@b.com").await;
        let other = signup(&server, "c@d.com").await;

        let created: Bookmark = server
            .post("/bookmarks")
            .authorization_bearer(&owner)
            .json(&json!({ "title": "Rust", "link": "https://www.rust-lang.org" }))
            .await
            .json();
        let path = format!("/bookmarks/{}", created.id);

        server.get(&path).authorization_bearer(&other).await.assert_status_not_found();
        server
            .patch(&path)
            .authorization_bearer(&other)
            .json(&json!({ "title": "Mine now" }))
            .await
            .assert_status_not_found();
        server.delete(&path).authorization_bearer(&other).await.assert_status_not_found();

        let list: Vec<Bookmark> = server.get("/bookmarks").authorization_bearer(&other).await.json();
        assert!(list.is_empty());

        server.get(&path).authorization_bearer(&owner).await.assert_status_ok();
        Ok(())
    }

    #[tokio::test]
    async fn list_is_newest_first_and_paginated() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let token = signup(&server, "a@b.com").await;

        for title in ["first", "second", "third"] {
            server
                .post("/bookmarks")
                .authorization_bearer(&token)
                .json(&json!({ "title": title, "link": "https://example.com" }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let list: Vec<Bookmark> = server.get("/bookmarks").authorization_bearer(&token).await.json();
        let titles: Vec<_> = list.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["third", "second", "first"]);

        let page: Vec<Bookmark> = server
            .get("/bookmarks")
            .add_query_param("offset", 1)
            .add_query_param("limit", 1)
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "second");

        server
            .get("/bookmarks")
            .add_query_param("limit", "many")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_input_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server()?;
        let token = signup(&server, "a@b.com").await;

        let bodies = [
            json!({ "title": "", "link": "https://example.com" }),
            json!({ "title": "Rust", "link": "not a url" }),
            json!({ "title": "Rust" }),
            json!({ "title": "Rust", "link": "https://example.com", "description": "x".repeat(2049) }),
        ];
        for body in &bodies {
            server
                .post("/bookmarks")
                .authorization_bearer(&token)
                .json(body)
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }

        server
            .get("/bookmarks/not-a-uuid")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .get(&format!("/bookmarks/{}", Uuid::new_v4()))
            .authorization_bearer(&token)
            .await
            .assert_status_not_found();

        Ok(())
    }

    #[tokio::test]
    async fn bookmarks_require_authentication() -> anyhow::Result<()> {
        let server = create_test_server()?;

        server.get("/bookmarks").await.assert_status(StatusCode::UNAUTHORIZED);
        server
            .post("/bookmarks")
            .json(&json!({ "title": "Rust", "link": "https://www.rust-lang.org" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }
}
