//! Issuing and verifying HS256 access tokens.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use jsonwebtoken::errors::Error as JwtError;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::extract::AuthClaims;
use crate::handler::{ErrorKind, Result};
use crate::{Error, Result as ServiceResult};

/// Shortest accepted HS256 secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

const DEFAULT_TOKEN_TTL_SECS: u64 = 900;
const MIN_TOKEN_TTL_SECS: u64 = 60;
const MAX_TOKEN_TTL_SECS: u64 = 86_400;
const DEFAULT_ISSUER: &str = "bookmarks";
const DEFAULT_AUDIENCE: &str = "bookmarks";

/// Access token configuration.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
pub struct AuthConfig {
    /// Shared HS256 signing secret (at least 32 bytes)
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long = "auth-jwt-secret", env = "AUTH_JWT_SECRET")
    )]
    pub jwt_secret: String,

    /// Access token lifetime in seconds (60-86400)
    #[cfg_attr(
        any(test, feature = "config"),
        arg(
            long = "auth-token-ttl-secs",
            env = "AUTH_TOKEN_TTL_SECS",
            default_value_t = DEFAULT_TOKEN_TTL_SECS
        )
    )]
    #[serde(default = "AuthConfig::default_token_ttl_secs")]
    pub token_ttl_secs: u64,

    /// Value of the `iss` claim
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long = "auth-jwt-issuer", env = "AUTH_JWT_ISSUER", default_value = DEFAULT_ISSUER)
    )]
    #[serde(default = "AuthConfig::default_issuer")]
    pub jwt_issuer: String,

    /// Value of the `aud` claim
    #[cfg_attr(
        any(test, feature = "config"),
        arg(
            long = "auth-jwt-audience",
            env = "AUTH_JWT_AUDIENCE",
            default_value = DEFAULT_AUDIENCE
        )
    )]
    #[serde(default = "AuthConfig::default_audience")]
    pub jwt_audience: String,
}

impl AuthConfig {
    /// Creates a configuration with default lifetime, issuer and audience.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            jwt_issuer: DEFAULT_ISSUER.to_owned(),
            jwt_audience: DEFAULT_AUDIENCE.to_owned(),
        }
    }

    pub fn with_token_ttl_secs(mut self, secs: u64) -> Self {
        self.token_ttl_secs = secs;
        self
    }

    #[inline]
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    pub fn validate(&self) -> ServiceResult<()> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(Error::config(format!(
                "JWT secret must be at least {MIN_SECRET_LEN} bytes long"
            )));
        }

        if !(MIN_TOKEN_TTL_SECS..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(Error::config(format!(
                "Token lifetime must be between {MIN_TOKEN_TTL_SECS} and {MAX_TOKEN_TTL_SECS} seconds"
            )));
        }

        if self.jwt_issuer.trim().is_empty() || self.jwt_audience.trim().is_empty() {
            return Err(Error::config("JWT issuer and audience cannot be empty"));
        }

        Ok(())
    }

    fn default_token_ttl_secs() -> u64 {
        DEFAULT_TOKEN_TTL_SECS
    }

    fn default_issuer() -> String {
        DEFAULT_ISSUER.to_owned()
    }

    fn default_audience() -> String {
        DEFAULT_AUDIENCE.to_owned()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .finish()
    }
}

/// Signs and verifies access tokens with a server-held secret.
///
/// Verification is pure computation: no store lookups, no revocation list.
#[derive(Clone)]
pub struct TokenIssuer {
    inner: Arc<TokenIssuerInner>,
}

struct TokenIssuerInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: AuthConfig,
}

impl TokenIssuer {
    /// Creates an issuer from a validated configuration.
    pub fn from_config(config: &AuthConfig) -> ServiceResult<Self> {
        config.validate()?;

        let secret = config.jwt_secret.as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.set_required_spec_claims(&["exp", "iat", "sub", "iss", "aud"]);

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            token_ttl_secs = config.token_ttl_secs,
            issuer = %config.jwt_issuer,
            "token issuer configured"
        );

        let inner = TokenIssuerInner {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            config: config.clone(),
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    #[inline]
    pub fn config(&self) -> &AuthConfig {
        &self.inner.config
    }

    /// Issues a token for the given user, valid for the configured lifetime.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String> {
        let config = &self.inner.config;
        let claims = AuthClaims::new(
            user_id,
            email,
            config.jwt_issuer.as_str(),
            config.jwt_audience.as_str(),
            config.token_ttl(),
        );

        self.encode(&claims)
    }

    /// Signs arbitrary claims.
    pub fn encode(&self, claims: &AuthClaims) -> Result<String> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.inner.encoding_key).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                user_id = %claims.user_id,
                "failed to encode access token"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication token generation failed")
                .with_resource("authentication")
        })
    }

    /// Verifies signature, expiry, issuer and audience, returning the claims.
    pub fn verify(&self, token: &str) -> Result<AuthClaims, JwtError> {
        let token_data =
            decode::<AuthClaims>(token, &self.inner.decoding_key, &self.inner.validation)?;
        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
