//! Application state and dependency injection.

use std::sync::Arc;

use crate::Result;
use crate::service::store::{BookmarkStore, CredentialStore};
use crate::service::{AuthService, PasswordHasher, ServiceConfig, TokenIssuer};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). Every part is
/// cheap to clone and is exposed to handlers through [`FromRef`].
///
/// [`State`]: axum::extract::State
/// [`FromRef`]: axum::extract::FromRef
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    auth_service: AuthService,
    token_issuer: TokenIssuer,
    credential_store: Arc<dyn CredentialStore>,
    bookmark_store: Arc<dyn BookmarkStore>,
}

impl ServiceState {
    /// Assembles the state from explicit parts.
    pub fn new(
        password_hasher: PasswordHasher,
        token_issuer: TokenIssuer,
        credential_store: Arc<dyn CredentialStore>,
        bookmark_store: Arc<dyn BookmarkStore>,
    ) -> Self {
        let auth_service = AuthService::new(
            password_hasher,
            token_issuer.clone(),
            credential_store.clone(),
        );

        Self {
            auth_service,
            token_issuer,
            credential_store,
            bookmark_store,
        }
    }

    /// Connects to the database and builds the production state.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let token_issuer = config.create_token_issuer()?;
        let pg_client = config.connect_postgres().await?;

        Ok(Self::new(
            PasswordHasher::new(),
            token_issuer,
            Arc::new(pg_client.clone()),
            Arc::new(pg_client),
        ))
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(auth_service: AuthService);
impl_di!(token_issuer: TokenIssuer);
impl_di!(credential_store: Arc<dyn CredentialStore>);
impl_di!(bookmark_store: Arc<dyn BookmarkStore>);
