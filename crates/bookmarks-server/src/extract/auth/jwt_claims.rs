//! Claims carried by an access token.

use std::time::Duration;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered and private claims of an HS256 access token.
///
/// `iat` and `exp` are Unix timestamps in seconds, as required by the
/// JWT registered claim definitions.
#[derive(Debug, Clone, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub struct AuthClaims {
    #[serde(rename = "iss")]
    pub issuer: String,
    #[serde(rename = "aud")]
    pub audience: String,

    #[serde(rename = "sub")]
    pub user_id: Uuid,
    pub email: String,

    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl AuthClaims {
    /// Creates claims issued now and expiring after `ttl`.
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        let issued_at = Timestamp::now().as_second();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            user_id,
            email: email.into(),
            issued_at,
            expires_at: issued_at.saturating_add(ttl_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_claims_expire_after_ttl() {
        let claims = AuthClaims::new(
            Uuid::new_v4(),
            "a@b.com",
            "bookmarks",
            "bookmarks",
            Duration::from_secs(900),
        );

        assert_eq!(claims.expires_at - claims.issued_at, 900);
        assert!(claims.expires_at > Timestamp::now().as_second());
    }

    #[test]
    fn serialized_claim_names() -> anyhow::Result<()> {
        let claims = AuthClaims::new(
            Uuid::nil(),
            "a@b.com",
            "issuer",
            "audience",
            Duration::from_secs(60),
        );
        let json = serde_json::to_value(&claims)?;

        assert_eq!(json["sub"], Uuid::nil().to_string());
        assert_eq!(json["iss"], "issuer");
        assert_eq!(json["aud"], "audience");
        assert_eq!(json["email"], "a@b.com");
        assert!(json["exp"].is_i64());
        Ok(())
    }
}
