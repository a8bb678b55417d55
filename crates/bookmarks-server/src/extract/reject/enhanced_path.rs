//! Path extractor whose rejections render as [`Error`] bodies.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::enhanced_json::sanitize_error_message;
use crate::handler::{Error, ErrorKind};

/// Drop-in replacement for [`axum::extract::Path`].
///
/// A parameter that fails to parse (for example a malformed UUID) becomes
/// a `400 Bad Request`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let extractor =
            <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await;
        extractor.map(|x| Self(x.0)).map_err(Into::into)
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                let error_message = err.body_text();
                let hint = if error_message.to_lowercase().contains("uuid") {
                    ". Identifiers must be UUIDs (xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx)"
                } else {
                    ""
                };

                ErrorKind::BadRequest
                    .with_message("Invalid path parameter format")
                    .with_context(format!(
                        "{}{}",
                        sanitize_error_message(&error_message),
                        hint
                    ))
            }
            rejection => ErrorKind::InternalServerError
                .with_message("Path processing failed")
                .with_context(sanitize_error_message(&rejection.body_text())),
        }
    }
}
