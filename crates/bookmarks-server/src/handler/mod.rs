//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! ```rust,ignore
//! use bookmarks_server::handler::routes;
//! use bookmarks_server::service::{ServiceConfig, ServiceState};
//!
//! let state = ServiceState::from_config(&config).await?;
//! let app = routes(state.clone()).with_state(state);
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod authentication;
mod bookmarks;
mod error;
pub mod request;
pub mod response;
mod users;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::ErrorResponse;
use crate::middleware::require_authentication;
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all private routes.
fn private_routes() -> Router<ServiceState> {
    Router::new()
        .merge(users::routes())
        .merge(bookmarks::routes())
}

/// Returns a [`Router`] with all public routes.
fn public_routes() -> Router<ServiceState> {
    Router::new().merge(authentication::routes())
}

/// Returns a [`Router`] with all routes.
///
/// Private routes sit behind [`require_authentication`], which resolves the
/// caller once per request before any handler runs.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    let require_authentication = from_fn_with_state(state, require_authentication);

    let private_router = private_routes().route_layer(require_authentication);
    let public_router = public_routes();

    Router::new()
        .merge(private_router)
        .merge(public_router)
        .fallback(handler)
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::handler::response::AuthToken;
    use crate::handler::routes;
    use crate::service::store::MemoryStore;
    use crate::service::{AuthConfig, PasswordHasher, ServiceState, TokenIssuer};

    const TEST_SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

    /// Returns a [`TokenIssuer`] sharing the secret of the test servers.
    pub fn test_token_issuer() -> TokenIssuer {
        TokenIssuer::from_config(&AuthConfig::new(TEST_SECRET)).expect("valid test auth config")
    }

    /// Returns a [`ServiceState`] backed by the given in-memory store.
    pub fn create_test_state(store: MemoryStore) -> ServiceState {
        ServiceState::new(
            PasswordHasher::new(),
            test_token_issuer(),
            Arc::new(store.clone()),
            Arc::new(store),
        )
    }

    /// Returns a new [`TestServer`] with all routes and the given store.
    pub fn create_test_server_with_store(store: MemoryStore) -> anyhow::Result<TestServer> {
        let state = create_test_state(store);
        let app = routes(state.clone()).with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] with all routes and an empty store.
    pub fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_store(MemoryStore::new())
    }

    /// Signs up a user with a fixed password and returns its access token.
    pub async fn signup(server: &TestServer, email: &str) -> String {
        let response = server
            .post("/auth/signup")
            .json(&json!({ "email": email, "password": "secret1" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<AuthToken>().access_token
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server()?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/nowhere").await;
        response.assert_status_not_found();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "not_found");

        Ok(())
    }
}
