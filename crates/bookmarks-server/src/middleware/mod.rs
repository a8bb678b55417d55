//! Middleware for `axum::Router` and HTTP request processing.
//!
//! ```rust,no_run
//! use axum::Router;
//! use bookmarks_server::middleware::{
//!     CorsConfig, DEFAULT_MAX_BODY_SIZE, RecoveryConfig, RouterObservabilityExt,
//!     RouterRecoveryExt, RouterSecurityExt, SecurityHeadersConfig,
//! };
//!
//! let app: Router = Router::new()
//!     .with_security(
//!         &CorsConfig::default(),
//!         &SecurityHeadersConfig::default(),
//!         DEFAULT_MAX_BODY_SIZE,
//!     )
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```

mod authentication;
mod observability;
mod recovery;
pub mod security;

pub use authentication::require_authentication;
pub use observability::{REQUEST_ID_HEADER, RouterObservabilityExt};
pub use recovery::{RecoveryConfig, RouterRecoveryExt, catch_panic, handle_error};
pub use security::{CorsConfig, DEFAULT_MAX_BODY_SIZE, RouterSecurityExt, SecurityHeadersConfig};
