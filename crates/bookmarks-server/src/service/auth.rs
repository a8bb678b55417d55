//! Signup and signin orchestration.

use std::sync::Arc;

use crate::handler::{ErrorKind, Result};
use crate::service::store::{CredentialStore, StoreError, normalize_email};
use crate::service::{PasswordHasher, TokenIssuer};

const TRACING_TARGET: &str = "bookmarks_server::service::auth";

/// Hashes and persists credentials on signup, verifies them on signin,
/// and issues an access token in both cases.
///
/// Neither operation leaves a partial write behind on failure: the only
/// write is the final user insert.
#[derive(Clone)]
pub struct AuthService {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    credential_store: Arc<dyn CredentialStore>,
}

impl AuthService {
    pub fn new(
        password_hasher: PasswordHasher,
        token_issuer: TokenIssuer,
        credential_store: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            password_hasher,
            token_issuer,
            credential_store,
        }
    }

    /// Registers a new user and returns an access token for it.
    ///
    /// Fails with `Conflict` if the email is taken, including when a
    /// concurrent signup wins the race to the unique index.
    pub async fn signup(&self, email: &str, password: &str) -> Result<String> {
        let email = normalize_email(email);

        if self
            .credential_store
            .find_user_by_email(&email)
            .await?
            .is_some()
        {
            tracing::warn!(
                target: TRACING_TARGET,
                email = %email,
                "signup failed: email already exists"
            );
            return Err(email_taken());
        }

        let password_hash = self.password_hasher.hash_password(password)?;
        let user = match self
            .credential_store
            .create_user(&email, &password_hash)
            .await
        {
            Ok(user) => user,
            Err(StoreError::Constraint(constraint)) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    email = %email,
                    constraint = %constraint,
                    "signup failed: concurrent registration"
                );
                return Err(constraint.into());
            }
            Err(error) => return Err(error.into()),
        };

        tracing::info!(
            target: TRACING_TARGET,
            user_id = %user.id,
            "user created"
        );

        self.token_issuer.issue(user.id, &user.email)
    }

    /// Verifies credentials and returns a fresh access token.
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the
    /// caller, in both the response and the time it takes.
    pub async fn signin(&self, email: &str, password: &str) -> Result<String> {
        let email = normalize_email(email);
        let user = self.credential_store.find_user_by_email(&email).await?;

        let Some(user) = user else {
            self.password_hasher.verify_dummy_password(password);
            tracing::warn!(
                target: TRACING_TARGET,
                email = %email,
                "signin failed: unknown email"
            );
            return Err(invalid_credentials());
        };

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            tracing::warn!(
                target: TRACING_TARGET,
                user_id = %user.id,
                "signin failed: wrong password"
            );
            return Err(invalid_credentials());
        }

        tracing::info!(
            target: TRACING_TARGET,
            user_id = %user.id,
            "signin successful"
        );

        self.token_issuer.issue(user.id, &user.email)
    }
}

fn email_taken() -> crate::handler::Error<'static> {
    ErrorKind::Conflict
        .with_message("An account with this email already exists")
        .with_resource("user")
}

fn invalid_credentials() -> crate::handler::Error<'static> {
    ErrorKind::Unauthorized
        .with_message("Invalid email or password")
        .with_resource("authentication")
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::service::AuthConfig;
    use crate::service::store::{MemoryStore, StoreResult, UserRecord};

    /// Never sees existing users on lookup, as if a concurrent signup
    /// committed between the lookup and the insert.
    struct RacingStore(MemoryStore);

    #[async_trait]
    impl CredentialStore for RacingStore {
        async fn find_user_by_email(&self, _email: &str) -> StoreResult<Option<UserRecord>> {
            Ok(None)
        }

        async fn find_user_by_id(&self, user_id: Uuid) -> StoreResult<Option<UserRecord>> {
            self.0.find_user_by_id(user_id).await
        }

        async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<UserRecord> {
            self.0.create_user(email, password_hash).await
        }
    }

    fn service(store: impl CredentialStore + 'static) -> anyhow::Result<AuthService> {
        let issuer = TokenIssuer::from_config(&AuthConfig::new("k".repeat(32)))?;
        Ok(AuthService::new(
            PasswordHasher::new(),
            issuer,
            Arc::new(store),
        ))
    }

    #[tokio::test]
    async fn signup_then_signin_resolve_same_user() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let auth = service(store.clone())?;

        let signup_token = auth.signup("a@b.com", "secret1").await?;
        let signin_token = auth.signin("A@B.com", "secret1").await?;

        let issuer = TokenIssuer::from_config(&AuthConfig::new("k".repeat(32)))?;
        let signup_claims = issuer.verify(&signup_token)?;
        let signin_claims = issuer.verify(&signin_token)?;
        assert_eq!(signup_claims.user_id, signin_claims.user_id);
        assert_eq!(signin_claims.email, "a@b.com");
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_signup_conflicts() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let auth = service(store.clone())?;

        auth.signup("a@b.com", "secret1").await?;
        let error = auth.signup("a@b.com", "other").await.expect_err("duplicate");

        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(store.user_count().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn signup_losing_insert_race_conflicts() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store.create_user("a@b.com", "$argon2id$existing").await?;
        let auth = service(RacingStore(store.clone()))?;

        let error = auth.signup("A@B.com", "secret1").await.expect_err("duplicate");

        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.resource(), Some("user"));
        assert_eq!(store.user_count().await, 1);

        let existing = store.find_user_by_email("a@b.com").await?;
        assert_eq!(
            existing.map(|user| user.password_hash),
            Some("$argon2id$existing".to_owned())
        );
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_signups_create_one_user() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let auth = service(store.clone())?;

        let results =
            futures::future::join_all((0..4).map(|_| auth.signup("r@b.com", "secret1"))).await;

        let created = results.iter().filter(|result| result.is_ok()).count();
        assert_eq!(created, 1);
        assert!(
            results
                .iter()
                .filter_map(|result| result.as_ref().err())
                .all(|error| error.kind() == ErrorKind::Conflict)
        );
        assert_eq!(store.user_count().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_unauthorized() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let auth = service(store.clone())?;
        auth.signup("a@b.com", "secret1").await?;

        let before = store.find_user_by_email("a@b.com").await?;
        let wrong = auth.signin("a@b.com", "wrong").await.expect_err("wrong password");
        let unknown = auth.signin("x@b.com", "secret1").await.expect_err("unknown email");
        let after = store.find_user_by_email("a@b.com").await?;

        assert_eq!(wrong.kind(), ErrorKind::Unauthorized);
        assert_eq!(unknown.kind(), ErrorKind::Unauthorized);
        assert_eq!(wrong.message(), unknown.message());
        assert_eq!(before, after);
        Ok(())
    }
}
