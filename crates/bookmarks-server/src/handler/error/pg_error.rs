//! Database error to HTTP error conversions.
//!
//! Known constraint violations become client errors with a readable message.
//! Everything else is logged and reported as a 500 without details.

use bookmarks_postgres::{ErrorHint, PgError};
use bookmarks_postgres::types::{BookmarkConstraints, ConstraintViolation, UserConstraints};

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "bookmarks_server::handler::postgres";

impl From<UserConstraints> for Error<'static> {
    fn from(c: UserConstraints) -> Self {
        let error = match c {
            UserConstraints::EmailUnique => {
                ErrorKind::Conflict.with_message("An account with this email already exists")
            }
            UserConstraints::EmailLength => {
                ErrorKind::BadRequest.with_message("Email address is too long")
            }
            UserConstraints::PasswordHashNotEmpty | UserConstraints::UpdatedAfterCreated => {
                ErrorKind::InternalServerError.into_error()
            }
        };

        error.with_resource("user")
    }
}

impl From<BookmarkConstraints> for Error<'static> {
    fn from(c: BookmarkConstraints) -> Self {
        let error = match c {
            BookmarkConstraints::TitleLength => ErrorKind::BadRequest
                .with_message("Title must be between 1 and 256 characters long"),
            BookmarkConstraints::LinkLength => {
                ErrorKind::BadRequest.with_message("Link cannot exceed 2048 characters")
            }
            BookmarkConstraints::DescriptionLength => {
                ErrorKind::BadRequest.with_message("Description cannot exceed 2048 characters")
            }
            BookmarkConstraints::UserReference => {
                ErrorKind::Unauthorized.with_message("The owning user no longer exists")
            }
            BookmarkConstraints::UpdatedAfterCreated => ErrorKind::InternalServerError.into_error(),
        };

        error.with_resource("bookmark")
    }
}

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::User(c) => c.into(),
            ConstraintViolation::Bookmark(c) => c.into(),
        }
    }
}

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        if let Some(constraint) = error.constraint_violation() {
            tracing::warn!(
                target: TRACING_TARGET,
                table = constraint.table_name(),
                constraint = %constraint,
                error = %error,
                "query error (constraint violation)"
            );
            return constraint.into();
        }

        if error.is_transient() {
            match &error {
                PgError::Timeout(timeout) => tracing::warn!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    hint = %timeout.hint(),
                    "database timeout"
                ),
                _ => tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "database connection lost"
                ),
            }

            return ErrorKind::InternalServerError
                .with_context("The database is temporarily unavailable, try again later");
        }

        match &error {
            PgError::Connection(connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
            }
            PgError::Query(query_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %query_error,
                    "query error"
                );
            }
            _ => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "unexpected database error"
                );
            }
        }

        ErrorKind::InternalServerError.into_error()
    }
}
