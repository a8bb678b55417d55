//! Startup and shutdown logging around the server future.

use std::future::Future;
use std::time::Instant;

use super::{ServerError, ServerResult};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Runs the server future and logs its outcome with the uptime.
pub async fn serve_with_lifecycle<F>(
    server_config: &ServerConfig,
    serve_fn: impl FnOnce() -> F,
) -> ServerResult<()>
where
    F: Future<Output = ServerResult<()>>,
{
    let start_time = Instant::now();

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "server bound to all interfaces, ensure a firewall or proxy is configured"
        );
    }

    let result = serve_fn().await;
    log_result(&result, start_time);
    result
}

fn log_result(result: &ServerResult<()>, start_time: Instant) {
    let uptime_secs = start_time.elapsed().as_secs();

    match result {
        Ok(()) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                uptime_secs,
                "shutdown completed"
            );
        }
        Err(err) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %err,
                uptime_secs,
                "fatal server error"
            );

            if let Some(suggestion) = err.suggestion() {
                tracing::info!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    suggestion,
                    "recovery suggestion"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[tokio::test]
    async fn passes_through_success() {
        let config = ServerConfig::default();
        let result = serve_with_lifecycle(&config, || async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn passes_through_errors() {
        let config = ServerConfig::default();
        let result = serve_with_lifecycle(&config, || async {
            Err(ServerError::Runtime(io::Error::other("test error")))
        })
        .await;

        assert!(matches!(result, Err(ServerError::Runtime(_))));
    }
}
