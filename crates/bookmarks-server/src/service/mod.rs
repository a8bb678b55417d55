//! Services, configuration and shared application state.

mod auth;
mod config;
mod security;
mod state;
pub mod store;

pub use crate::service::auth::AuthService;
pub use crate::service::config::ServiceConfig;
pub use crate::service::security::{AuthConfig, MIN_SECRET_LEN, PasswordHasher, TokenIssuer};
pub use crate::service::state::ServiceState;
pub use crate::service::store::{BookmarkStore, CredentialStore};
