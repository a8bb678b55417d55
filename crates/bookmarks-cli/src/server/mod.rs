//! HTTP server startup, graceful shutdown and lifecycle logging.

mod error;
mod http_server;
mod lifecycle;
mod shutdown;

use axum::Router;

pub use self::error::{ServerError, ServerResult};
use self::http_server::serve_http;
use crate::config::ServerConfig;

/// Binds the configured address and serves `app` until a shutdown signal.
pub async fn serve(app: Router, config: ServerConfig) -> ServerResult<()> {
    serve_http(app, config).await
}
