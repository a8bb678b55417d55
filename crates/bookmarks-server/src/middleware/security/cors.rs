//! CORS (Cross-Origin Resource Sharing) configuration.

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
#[cfg(any(test, feature = "config"))]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::{Error, Result};

/// Origins allowed when none are configured.
const LOCALHOST_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
];

/// Creates a CORS layer from the configuration.
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.to_header_values())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(config.allow_credentials)
        .max_age(config.max_age())
}

/// CORS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// Allowed origins; localhost development origins when empty.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',')
    )]
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Maximum age for CORS preflight responses in seconds.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "CORS_MAX_AGE", default_value_t = 3600)
    )]
    pub max_age_seconds: u64,

    /// Whether to allow credentials in CORS requests.
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long, env = "CORS_ALLOW_CREDENTIALS", default_value_t = false)
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            allow_credentials: false,
        }
    }
}

impl CorsConfig {
    /// Returns the CORS max age as a [`Duration`].
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Converts configured origins to header values.
    ///
    /// Origins that are not valid header values are skipped; `validate`
    /// reports them up front.
    pub fn to_header_values(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.is_empty() {
            return LOCALHOST_ORIGINS
                .into_iter()
                .map(HeaderValue::from_static)
                .collect();
        }

        self.allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok())
            .collect()
    }

    /// Rejects wildcard and unparsable origins.
    pub fn validate(&self) -> Result<()> {
        for origin in &self.allowed_origins {
            let origin = origin.trim();
            if origin == "*" {
                return Err(Error::config(
                    "Wildcard CORS origin is not allowed; list origins explicitly",
                ));
            }
            if HeaderValue::from_str(origin).is_err() {
                return Err(Error::config(format!("Invalid CORS origin: {origin}")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_localhost_origins() {
        let origins = CorsConfig::default().to_header_values();
        assert_eq!(origins.len(), LOCALHOST_ORIGINS.len());
    }

    #[test]
    fn custom_origins() {
        let config = CorsConfig {
            allowed_origins: vec![
                "https://example.com".to_owned(),
                " https://app.example.com".to_owned(),
            ],
            ..Default::default()
        };
        assert_eq!(config.to_header_values().len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_wildcard_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["*".to_owned()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
