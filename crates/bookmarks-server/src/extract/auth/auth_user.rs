//! Authenticated user extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;
use serde_json::Value;
use strum::{Display, EnumString};
use uuid::Uuid;

use super::AuthHeader;
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::store::UserRecord;
use crate::service::{CredentialStore, TokenIssuer};

/// Field of the authenticated user addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum UserField {
    Id,
    Email,
    FirstName,
    LastName,
    CreatedAt,
    UpdatedAt,
}

/// User record resolved from a verified access token.
///
/// Extraction verifies the bearer token and then loads the `sub` user from
/// the credential store. A verified token whose user no longer exists is
/// rejected with `401 Unauthorized`.
///
/// The resolved user is cached in the request extensions, so the
/// authentication middleware and the handler behind it share one lookup.
#[derive(Debug, Clone, Deref)]
pub struct AuthUser(pub UserRecord);

impl AuthUser {
    #[inline]
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    #[inline]
    pub fn into_inner(self) -> UserRecord {
        self.0
    }

    /// Returns a single field of the user as a JSON value.
    ///
    /// The password hash is not addressable.
    pub fn field(&self, field: UserField) -> Value {
        let user = &self.0;
        match field {
            UserField::Id => Value::String(user.id.to_string()),
            UserField::Email => Value::String(user.email.clone()),
            UserField::FirstName => user.first_name.clone().map_or(Value::Null, Value::String),
            UserField::LastName => user.last_name.clone().map_or(Value::Null, Value::String),
            UserField::CreatedAt => Value::String(user.created_at.to_string()),
            UserField::UpdatedAt => Value::String(user.updated_at.to_string()),
        }
    }

    async fn from_header(
        auth_header: AuthHeader,
        credential_store: &dyn CredentialStore,
    ) -> Result<Self> {
        let claims = auth_header.into_auth_claims();

        let user = credential_store
            .find_user_by_id(claims.user_id)
            .await
            .map_err(|error| {
                tracing::error!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    user_id = %claims.user_id,
                    error = %error,
                    "failed to load authenticated user"
                );
                Error::from(error)
            })?;

        let Some(user) = user else {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                user_id = %claims.user_id,
                "token subject no longer exists"
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Authenticated user no longer exists")
                .with_resource("authentication"));
        };

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            user_id = %user.id,
            "request authenticated"
        );

        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Sync + Send,
    TokenIssuer: FromRef<S>,
    Arc<dyn CredentialStore>: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<Self>() {
            return Ok(auth_user.clone());
        }

        let auth_header = AuthHeader::from_request_parts(parts, state).await?;
        let credential_store = <Arc<dyn CredentialStore>>::from_ref(state);
        let auth_user = Self::from_header(auth_header, credential_store.as_ref()).await?;

        parts.extensions.insert(auth_user.clone());
        Ok(auth_user)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Sync + Send,
    TokenIssuer: FromRef<S>,
    Arc<dyn CredentialStore>: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <Self as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(auth_user) => Ok(Some(auth_user)),
            Err(error) if error.kind() == ErrorKind::MissingAuthToken => Ok(None),
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use jiff::Timestamp;

    use super::*;

    fn user() -> AuthUser {
        let now = Timestamp::now();
        AuthUser(UserRecord {
            id: Uuid::new_v4(),
            email: "a@b.com".to_owned(),
            password_hash: "$argon2id$secret".to_owned(),
            first_name: Some("Ada".to_owned()),
            last_name: None,
            created_at: now,
            updated_at: now,
        })
    }

    #[test]
    fn field_returns_single_value() {
        let user = user();
        assert_eq!(user.field(UserField::Email), Value::from("a@b.com"));
        assert_eq!(user.field(UserField::Id), Value::from(user.id().to_string()));
        assert_eq!(user.field(UserField::FirstName), Value::from("Ada"));
        assert_eq!(user.field(UserField::LastName), Value::Null);
    }

    #[test]
    fn field_names_parse() -> anyhow::Result<()> {
        assert_eq!(UserField::from_str("email")?, UserField::Email);
        assert_eq!(UserField::from_str("created_at")?, UserField::CreatedAt);
        assert!(UserField::from_str("password_hash").is_err());
        assert_eq!(UserField::FirstName.to_string(), "first_name");
        Ok(())
    }
}
