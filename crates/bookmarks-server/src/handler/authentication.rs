//! Signup and signin handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;

use crate::extract::{Json, ValidateJson};
use crate::handler::Result;
use crate::handler::request::AuthCredentials;
use crate::handler::response::AuthToken;
use crate::service::{AuthService, ServiceState};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "bookmarks_server::handler::authentication";

/// Registers a new user and returns an access token for it.
#[tracing::instrument(skip_all)]
async fn signup(
    State(auth_service): State<AuthService>,
    ValidateJson(request): ValidateJson<AuthCredentials>,
) -> Result<(StatusCode, Json<AuthToken>)> {
    tracing::trace!(target: TRACING_TARGET, email = %request.email, "signup attempt");

    let access_token = auth_service
        .signup(&request.email, &request.password)
        .await?;

    tracing::info!(target: TRACING_TARGET, "signup succeeded");
    Ok((StatusCode::CREATED, Json(AuthToken::new(access_token))))
}

/// Exchanges valid credentials for an access token.
#[tracing::instrument(skip_all)]
async fn signin(
    State(auth_service): State<AuthService>,
    ValidateJson(request): ValidateJson<AuthCredentials>,
) -> Result<(StatusCode, Json<AuthToken>)> {
    tracing::trace!(target: TRACING_TARGET, email = %request.email, "signin attempt");

    let access_token = auth_service
        .signin(&request.email, &request.password)
        .await?;

    tracing::debug!(target: TRACING_TARGET, "signin succeeded");
    Ok((StatusCode::OK, Json(AuthToken::new(access_token))))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
}
