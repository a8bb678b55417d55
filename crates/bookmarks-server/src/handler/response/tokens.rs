//! Access token response.

use serde::{Deserialize, Serialize};

/// Signed access token returned by signup and signin.
#[must_use]
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
}

impl AuthToken {
    #[inline]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
