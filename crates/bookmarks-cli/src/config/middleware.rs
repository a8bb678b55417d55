//! Middleware configuration for the HTTP server.

use anyhow::anyhow;
use bookmarks_server::middleware::{CorsConfig, DEFAULT_MAX_BODY_SIZE, RecoveryConfig};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Middleware configuration combining CORS, recovery and body limits.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Request timeout and panic recovery.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,

    /// Largest accepted request body in bytes.
    #[arg(long, env = "MAX_BODY_SIZE", default_value_t = DEFAULT_MAX_BODY_SIZE)]
    pub max_body_size: usize,
}

impl MiddlewareConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.cors.validate()?;
        self.recovery.validate()?;

        if self.max_body_size == 0 {
            return Err(anyhow!("Maximum body size must be greater than zero"));
        }

        Ok(())
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            credentials = self.cors.allow_credentials,
            request_timeout_secs = self.recovery.request_timeout,
            max_body_size = self.max_body_size,
            "middleware configuration"
        );
    }
}
