//! Graceful shutdown signal handling.

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix;
use tokio_util::sync::CancellationToken;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Waits for a shutdown signal (SIGTERM or SIGINT/Ctrl+C).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %e,
                "Failed to install Ctrl+C handler"
            );
            std::future::pending::<()>().await;
        } else {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                "Received Ctrl+C signal, initiating graceful shutdown"
            );
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    "Received SIGTERM signal, initiating graceful shutdown"
                );
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    error = %e,
                    "Failed to install SIGTERM handler"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Drives `server` until it finishes on its own, or until `shutdown` is
/// cancelled and the grace period runs out.
///
/// The server future is expected to stop accepting connections once
/// `shutdown` is cancelled and to resolve when in-flight requests drain.
/// Connections still open after `grace_period` are dropped.
pub async fn with_grace_period<F>(
    server: F,
    shutdown: CancellationToken,
    grace_period: Duration,
) -> io::Result<()>
where
    F: Future<Output = io::Result<()>>,
{
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result,
        () = shutdown.cancelled() => {}
    }

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        grace_period_secs = grace_period.as_secs(),
        "Waiting for in-flight requests to finish"
    );

    match tokio::time::timeout(grace_period, &mut server).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                grace_period_secs = grace_period.as_secs(),
                "Grace period elapsed, dropping remaining connections"
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn server_finishing_first_is_returned() {
        let shutdown = CancellationToken::new();
        let result = with_grace_period(async { Ok(()) }, shutdown, Duration::from_secs(30)).await;
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn draining_server_completes_within_grace_period() {
        let shutdown = CancellationToken::new();
        let drained = Arc::new(AtomicBool::new(false));

        let server = {
            let shutdown = shutdown.clone();
            let drained = drained.clone();
            async move {
                shutdown.cancelled().await;
                tokio::time::sleep(Duration::from_secs(5)).await;
                drained.store(true, Ordering::SeqCst);
                Ok(())
            }
        };

        shutdown.cancel();
        let result = with_grace_period(server, shutdown, Duration::from_secs(30)).await;

        assert!(result.is_ok());
        assert!(drained.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn stuck_server_is_abandoned_after_grace_period() {
        let shutdown = CancellationToken::new();
        let server = std::future::pending::<io::Result<()>>();

        shutdown.cancel();
        let started = tokio::time::Instant::now();
        let result = with_grace_period(server, shutdown, Duration::from_secs(30)).await;

        assert!(result.is_ok());
        assert!(started.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn server_error_is_propagated() {
        let shutdown = CancellationToken::new();
        let server = async { Err(io::Error::other("accept loop failed")) };

        let result = with_grace_period(server, shutdown, Duration::from_secs(30)).await;
        assert!(result.is_err());
    }
}
