//! Request tracing and request id propagation.

use axum::Router;
use axum::http::{HeaderName, header};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Layers [`SetRequestId`], [`Trace`] and [`PropagateRequestId`] middlewares.
    ///
    /// Every request gets a UUID `x-request-id` unless the client sent one,
    /// and the id is echoed on the response. `Authorization` and `Cookie`
    /// are marked sensitive so they are redacted from traces.
    ///
    /// [`SetRequestId`]: tower_http::request_id::SetRequestIdLayer
    /// [`Trace`]: tower_http::trace::TraceLayer
    /// [`PropagateRequestId`]: tower_http::request_id::PropagateRequestIdLayer
    fn with_observability(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        // Last layer wraps first.
        self.layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
            .layer(SetSensitiveRequestHeadersLayer::new([
                header::AUTHORIZATION,
                header::COOKIE,
            ]))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    fn server() -> anyhow::Result<TestServer> {
        let app: Router = Router::new()
            .route("/", get(|| async { "ok" }))
            .with_observability();
        Ok(TestServer::new(app)?)
    }

    #[tokio::test]
    async fn generates_request_id() -> anyhow::Result<()> {
        let server = server()?;

        let response = server.get("/").await;
        let request_id = response.header(REQUEST_ID_HEADER);
        assert!(uuid::Uuid::parse_str(request_id.to_str()?).is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn propagates_client_request_id() -> anyhow::Result<()> {
        let server = server()?;

        let response = server
            .get("/")
            .add_header(REQUEST_ID_HEADER, HeaderValue::from_static("abc-123"))
            .await;
        assert_eq!(response.header(REQUEST_ID_HEADER), "abc-123");

        Ok(())
    }
}
