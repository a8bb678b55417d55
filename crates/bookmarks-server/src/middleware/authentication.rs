//! Authentication gate for private routes.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::extract::AuthUser;

/// Rejects the request unless it carries a valid token of an existing user.
///
/// The resolved [`AuthUser`] stays cached in the request extensions, so
/// handlers extracting it again do not repeat the verification.
pub async fn require_authentication(
    AuthUser(_): AuthUser,
    request: Request,
    next: Next,
) -> Response {
    next.run(request).await
}
