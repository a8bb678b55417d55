//! HTTP server startup.

use std::future::IntoFuture;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;

use super::lifecycle::serve_with_lifecycle;
use super::shutdown::shutdown_signal;
use super::{ServerError, ServerResult};
use crate::TRACING_TARGET_SERVER_SHUTDOWN;
use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;

/// Binds the configured address and serves `app` with graceful shutdown.
///
/// After a shutdown signal, in-flight requests get `shutdown_timeout` to
/// finish before the server stops waiting for them.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    let server_addr = server_config.server_addr();

    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %err,
            "failed to bind to address"
        );
        ServerError::bind(server_addr, err)
    })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "server is ready and listening for connections"
    );

    let shutdown_timeout = server_config.shutdown_timeout();
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let signal = async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    };

    let deadline = async move {
        if shutdown_rx.wait_for(|requested| *requested).await.is_err() {
            return std::future::pending().await;
        }
        tokio::time::sleep(shutdown_timeout).await;
    };

    serve_with_lifecycle(&server_config, || async move {
        let server = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(signal)
        .into_future();

        tokio::select! {
            result = server => result.map_err(ServerError::Runtime),
            () = deadline => {
                tracing::warn!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    timeout_secs = shutdown_timeout.as_secs(),
                    "shutdown timeout elapsed, dropping in-flight requests"
                );
                Ok(())
            }
        }
    })
    .await
}
