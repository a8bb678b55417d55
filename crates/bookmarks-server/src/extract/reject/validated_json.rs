//! JSON extractor that also runs [`Validate`] on the payload.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "bookmarks_server::extract::validate";

/// Deserializes a JSON body and validates it.
///
/// Deserialization failures and validation failures both become
/// `400 Bad Request`, the latter with one sentence per failing field.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self(data))
    }
}

fn format_length_error(
    field: &str,
    params: &HashMap<Cow<'static, str>, serde_json::Value>,
) -> String {
    let min = params.get("min").and_then(serde_json::Value::as_u64);
    let max = params.get("max").and_then(serde_json::Value::as_u64);

    match (min, max) {
        (Some(min), Some(max)) => {
            format!("Field '{field}' must be between {min} and {max} characters long")
        }
        (Some(min), None) => format!("Field '{field}' must be at least {min} characters long"),
        (None, Some(max)) => format!("Field '{field}' must be at most {max} characters long"),
        (None, None) => format!("Field '{field}' has invalid length"),
    }
}

fn format_validation_error(field: &str, error: &ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return format!("Field '{field}': {custom_message}");
    }

    let message = match error.code.as_ref() {
        "length" => return format_length_error(field, &error.params),
        "required" => "is required and cannot be empty",
        "email" => "must be a valid email address (e.g., user@example.com)",
        "url" => "must be a valid URL (e.g., https://example.com)",
        code => return format!("Field '{field}' failed validation: {code}"),
    };

    format!("Field '{field}' {message}")
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut error_messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();
        error_messages.sort();

        let user_message = match error_messages.as_slice() {
            [] => "Validation failed".to_owned(),
            [single_error] => single_error.clone(),
            multiple => multiple.join(". "),
        };

        tracing::debug!(
            target: TRACING_TARGET,
            errors = ?errors.field_errors(),
            "request validation failed"
        );

        ErrorKind::BadRequest
            .with_message(user_message)
            .with_resource("request")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Validate)]
    struct Credentials {
        #[validate(email)]
        email: String,
        #[validate(length(min = 1, max = 256))]
        password: String,
    }

    #[test]
    fn validation_errors_become_bad_request() {
        let credentials = Credentials {
            email: "not-an-email".to_owned(),
            password: String::new(),
        };

        let error: Error = credentials.validate().expect_err("invalid").into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);

        let message = error.message().unwrap_or_default();
        assert!(message.contains("Field 'email' must be a valid email address"));
        assert!(message.contains("Field 'password' must be between 1 and 256 characters long"));
    }
}
