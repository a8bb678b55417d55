//! CORS, security headers, compression and request body limits.

mod cors;
mod headers_config;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{self, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::set_header::SetResponseHeaderLayer;

pub use self::cors::{CorsConfig, create_cors_layer};
pub use self::headers_config::{FrameOptions, ReferrerPolicy, SecurityHeadersConfig};

/// Default maximum request body size: 1MiB.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S> {
    /// Layers CORS, security headers, response compression and a request
    /// body size limit of `max_body_size` bytes.
    fn with_security(
        self,
        cors: &CorsConfig,
        headers: &SecurityHeadersConfig,
        max_body_size: usize,
    ) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(
        self,
        cors: &CorsConfig,
        headers: &SecurityHeadersConfig,
        max_body_size: usize,
    ) -> Self {
        let mut router = self
            .layer(DefaultBodyLimit::max(max_body_size))
            .layer(CompressionLayer::new())
            .layer(create_cors_layer(cors))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static(headers.frame_options.as_str()),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::REFERRER_POLICY,
                HeaderValue::from_static(headers.referrer_policy.as_str()),
            ));

        if let Ok(hsts) = HeaderValue::from_str(&headers.hsts_header_value()) {
            router = router.layer(SetResponseHeaderLayer::overriding(
                header::STRICT_TRANSPORT_SECURITY,
                hsts,
            ));
        }

        if let Some(csp) = headers
            .csp_header_value()
            .and_then(|csp| HeaderValue::from_str(csp).ok())
        {
            router = router.layer(SetResponseHeaderLayer::overriding(
                header::CONTENT_SECURITY_POLICY,
                csp,
            ));
        }

        router
    }
}
