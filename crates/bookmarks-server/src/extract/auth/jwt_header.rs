//! Bearer token extraction and verification.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};

use super::AuthClaims;
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::TokenIssuer;

/// Verified claims of the request's `Authorization: Bearer` token.
///
/// Verification covers signature, expiry, issuer and audience. It does not
/// check that the user still exists; [`AuthUser`] does that.
///
/// The header is cached in the request extensions, so extracting it more
/// than once per request verifies the token only once.
///
/// [`AuthUser`]: super::AuthUser
#[must_use]
#[derive(Debug, Clone)]
pub struct AuthHeader {
    auth_claims: AuthClaims,
}

impl AuthHeader {
    #[inline]
    pub const fn new(auth_claims: AuthClaims) -> Self {
        Self { auth_claims }
    }

    #[inline]
    pub fn into_auth_claims(self) -> AuthClaims {
        self.auth_claims
    }

    fn from_header(
        authorization_header: TypedHeader<Authorization<Bearer>>,
        token_issuer: &TokenIssuer,
    ) -> Result<Self> {
        let auth_claims = token_issuer.verify(authorization_header.token())?;
        Ok(Self::new(auth_claims))
    }
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Sync + Send,
    TokenIssuer: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts.extensions.get::<Self>() {
            return Ok(auth_header.clone());
        }

        type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;
        let token_issuer = TokenIssuer::from_ref(state);

        match AuthBearerHeader::from_request_parts(parts, state).await {
            Ok(bearer_header) => {
                let auth_header = Self::from_header(bearer_header, &token_issuer)?;
                parts.extensions.insert(auth_header.clone());
                Ok(auth_header)
            }
            Err(rejection) => {
                let error = match rejection.reason() {
                    TypedHeaderRejectionReason::Missing => ErrorKind::MissingAuthToken
                        .with_message("Authentication required")
                        .with_context("Missing Authorization header with Bearer token"),
                    TypedHeaderRejectionReason::Error(_) => ErrorKind::MalformedAuthToken
                        .with_message("Invalid token format")
                        .with_context("Authorization header must contain a valid Bearer token"),
                    _ => ErrorKind::InternalServerError
                        .with_message("Authentication processing failed")
                        .with_context("Unexpected error during header extraction"),
                };

                Err(error.with_resource("authentication"))
            }
        }
    }
}

impl From<JwtError> for Error<'static> {
    fn from(error: JwtError) -> Self {
        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            error = %error,
            "access token rejected"
        );

        let error = match error.kind() {
            JwtErrorKind::ExpiredSignature => ErrorKind::Unauthorized
                .with_message("Access token has expired")
                .with_context("Sign in again to obtain a new token"),
            JwtErrorKind::InvalidSignature => ErrorKind::Unauthorized
                .with_message("Access token signature is invalid"),
            JwtErrorKind::InvalidIssuer | JwtErrorKind::InvalidAudience => {
                ErrorKind::Unauthorized.with_message("Access token was not issued for this service")
            }
            JwtErrorKind::InvalidToken
            | JwtErrorKind::Base64(_)
            | JwtErrorKind::Json(_)
            | JwtErrorKind::Utf8(_)
            | JwtErrorKind::MissingRequiredClaim(_)
            | JwtErrorKind::InvalidAlgorithm => {
                ErrorKind::MalformedAuthToken.with_message("Access token is malformed")
            }
            _ => ErrorKind::Unauthorized.with_message("Access token is invalid"),
        };

        error.with_resource("authentication")
    }
}
