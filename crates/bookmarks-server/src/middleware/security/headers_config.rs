//! Security response headers.

use serde::{Deserialize, Serialize};

/// Security headers added to every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct SecurityHeadersConfig {
    /// HSTS max age in seconds.
    pub hsts_max_age_seconds: u64,
    pub hsts_include_subdomains: bool,

    /// Content Security Policy directives; omitted when `None`.
    pub content_security_policy: Option<String>,

    pub frame_options: FrameOptions,
    pub referrer_policy: ReferrerPolicy,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            hsts_max_age_seconds: 31_536_000,
            hsts_include_subdomains: true,
            content_security_policy: Some("default-src 'none'; frame-ancestors 'none'".to_owned()),
            frame_options: FrameOptions::Deny,
            referrer_policy: ReferrerPolicy::NoReferrer,
        }
    }
}

impl SecurityHeadersConfig {
    /// Returns the `Strict-Transport-Security` header value.
    pub fn hsts_header_value(&self) -> String {
        if self.hsts_include_subdomains {
            format!("max-age={}; includeSubDomains", self.hsts_max_age_seconds)
        } else {
            format!("max-age={}", self.hsts_max_age_seconds)
        }
    }

    pub fn csp_header_value(&self) -> Option<&str> {
        self.content_security_policy.as_deref()
    }
}

/// `X-Frame-Options` header values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameOptions {
    Deny,
    SameOrigin,
}

impl FrameOptions {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deny => "DENY",
            Self::SameOrigin => "SAMEORIGIN",
        }
    }
}

/// `Referrer-Policy` header values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferrerPolicy {
    NoReferrer,
    Origin,
    StrictOriginWhenCrossOrigin,
}

impl ReferrerPolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoReferrer => "no-referrer",
            Self::Origin => "origin",
            Self::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsts_header_value() {
        let config = SecurityHeadersConfig::default();
        assert_eq!(
            config.hsts_header_value(),
            "max-age=31536000; includeSubDomains"
        );

        let config = SecurityHeadersConfig {
            hsts_include_subdomains: false,
            ..Default::default()
        };
        assert_eq!(config.hsts_header_value(), "max-age=31536000");
    }

    #[test]
    fn header_strings() {
        assert_eq!(FrameOptions::SameOrigin.as_str(), "SAMEORIGIN");
        assert_eq!(
            ReferrerPolicy::StrictOriginWhenCrossOrigin.as_str(),
            "strict-origin-when-cross-origin"
        );
    }
}
