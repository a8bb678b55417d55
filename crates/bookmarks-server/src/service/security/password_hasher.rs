//! Password hashing and verification using Argon2id.
//!
//! Hashes are stored in PHC string format (`$argon2id$v=19$...`), which
//! embeds the salt and parameters next to the digest.

use std::sync::LazyLock;

use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};
use rand::rngs::OsRng;

use crate::handler::{ErrorKind, Result};

const TRACING_TARGET: &str = "bookmarks_server::service::password_hasher";

/// Digest of a random password that no user knows, used to spend the same
/// verification time on unknown emails as on known ones.
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| {
    use rand::Rng;

    let password_len = rand::random_range(16..32);
    let dummy_password: String = (0..password_len)
        .map(|_| rand::rng().sample(rand::distr::Alphanumeric) as char)
        .collect();

    PasswordHasher::new().hash_password(&dummy_password).ok()
});

/// Argon2id password hasher with default parameters.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hashes a password with a fresh random salt.
    ///
    /// Fails only if salt generation or hashing itself fails, which maps
    /// to an internal server error.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::try_from_rng(&mut OsRng).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "failed to generate password salt"
            );

            ErrorKind::InternalServerError
                .with_message("Password processing failed")
                .with_resource("authentication")
        })?;

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing failed"
                );

                ErrorKind::InternalServerError
                    .with_message("Password processing failed")
                    .with_resource("authentication")
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies a password against a stored PHC hash.
    ///
    /// A mismatch is `Ok(false)`. A stored hash that cannot be parsed or
    /// checked is an internal error.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "stored password hash is not a valid PHC string"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication temporarily unavailable")
                .with_resource("authentication")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(ArgonError::Password) => {
                tracing::debug!(target: TRACING_TARGET, "password mismatch");
                Ok(false)
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password verification failed"
                );

                Err(ErrorKind::InternalServerError
                    .with_message("Authentication temporarily unavailable")
                    .with_resource("authentication"))
            }
        }
    }

    /// Runs a verification against a fixed digest and always returns false.
    pub fn verify_dummy_password(&self, password: &str) -> bool {
        if let Some(dummy_hash) = DUMMY_HASH.as_deref() {
            let _ = self.verify_password(password, dummy_hash);
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("secret1")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("secret1", &hash)?);
        assert!(!hasher.verify_password("wrong", &hash)?);
        Ok(())
    }

    #[test]
    fn hash_produces_unique_salts() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();

        let hash1 = hasher.hash_password("secret1")?;
        let hash2 = hasher.hash_password("secret1")?;

        assert_ne!(hash1, hash2);
        assert!(hasher.verify_password("secret1", &hash1)?);
        assert!(hasher.verify_password("secret1", &hash2)?);
        Ok(())
    }

    #[test]
    fn invalid_hash_is_internal_error() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify_password("secret1", "not_a_phc_string");

        let error = result.expect_err("invalid hash must fail");
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn dummy_verification_never_succeeds() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_dummy_password("secret1"));
        assert!(DUMMY_HASH.is_some());
    }
}
