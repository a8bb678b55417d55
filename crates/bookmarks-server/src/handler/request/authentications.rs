//! Authentication request types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for both signup and signin.
#[must_use]
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct AuthCredentials {
    /// Email address of the user.
    #[validate(email)]
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    /// Plaintext password of the user.
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

impl std::fmt::Debug for AuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(email: &str, password: &str) -> AuthCredentials {
        AuthCredentials {
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    #[test]
    fn accepts_valid_credentials() {
        assert!(credentials("a@b.com", "secret1").validate().is_ok());
    }

    #[test]
    fn rejects_invalid_credentials() {
        assert!(credentials("", "secret1").validate().is_err());
        assert!(credentials("not-an-email", "secret1").validate().is_err());
        assert!(credentials("a@b.com", "").validate().is_err());
        assert!(credentials("a@b.com", &"x".repeat(257)).validate().is_err());
    }

    #[test]
    fn debug_hides_password() {
        let debug = format!("{:?}", credentials("a@b.com", "secret1"));
        assert!(!debug.contains("secret1"));
    }
}
