//! Handlers for the authenticated user.

use axum::Router;
use axum::routing::get;

use crate::extract::{AuthUser, Json};
use crate::handler::Result;
use crate::handler::response::User;
use crate::service::ServiceState;

/// Tracing target for user operations.
const TRACING_TARGET: &str = "bookmarks_server::handler::users";

/// Returns the authenticated user without its password hash.
#[tracing::instrument(skip_all)]
async fn get_me(auth_user: AuthUser) -> Result<Json<User>> {
    tracing::trace!(target: TRACING_TARGET, user_id = %auth_user.id(), "reading own profile");
    Ok(Json(auth_user.into_inner().into()))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/users/me", get(get_me))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::header::AUTHORIZATION;
    use axum::http::{HeaderValue, StatusCode};
    use uuid::Uuid;

    use crate::extract::AuthClaims;
    use crate::handler::response::User;
    use crate::handler::test::{create_test_server_with_store, signup, test_token_issuer};
    use crate::service::store::MemoryStore;

    #[tokio::test]
    async fn me_resolves_token_subject() -> anyhow::Result<()> {
        let server = create_test_server_with_store(MemoryStore::new())?;
        let token_a = signup(&server, "a@b.com").await;
        let token_b = signup(&server, "c@d.com").await;

        let me: User = server.get("/users/me").authorization_bearer(&token_a).await.json();
        assert_eq!(me.email, "a@b.com");

        let me: User = server.get("/users/me").authorization_bearer(&token_b).await.json();
        assert_eq!(me.email, "c@d.com");

        Ok(())
    }

    #[tokio::test]
    async fn missing_token_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_store(MemoryStore::new())?;

        let response = server.get("/users/me").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "missing_auth_token");

        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_store(MemoryStore::new())?;

        server
            .get("/users/me")
            .add_header(AUTHORIZATION, HeaderValue::from_static("Basic YTpi"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .get("/users/me")
            .authorization_bearer("not.a.jwt")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_store(MemoryStore::new())?;
        let token = signup(&server, "a@b.com").await;

        let signature_start = token.rfind('.').map_or(0, |i| i + 1);
        let (head, signature) = token.split_at(signature_start);
        let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{head}{flipped}{}", &signature[1..]);

        server
            .get("/users/me")
            .authorization_bearer(&tampered)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_store(MemoryStore::new())?;
        let token = signup(&server, "a@b.com").await;
        let claims = test_token_issuer().verify(&token)?;

        let mut expired = AuthClaims::new(
            claims.user_id,
            claims.email,
            claims.issuer,
            claims.audience,
            Duration::from_secs(60),
        );
        expired.issued_at -= 7200;
        expired.expires_at -= 7200;
        let expired = test_token_issuer().encode(&expired)?;

        let response = server.get("/users/me").authorization_bearer(&expired).await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn deleted_user_is_rejected() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let server = create_test_server_with_store(store.clone())?;
        let token = signup(&server, "a@b.com").await;
        let claims = test_token_issuer().verify(&token)?;

        assert!(store.delete_user(claims.user_id).await);

        server
            .get("/users/me")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_subject_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_store(MemoryStore::new())?;
        let token = test_token_issuer().issue(Uuid::new_v4(), "ghost@b.com")?;

        server
            .get("/users/me")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }
}
