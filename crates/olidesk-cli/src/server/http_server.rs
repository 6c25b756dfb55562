//! HTTP server startup.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;
use crate::server::lifecycle::serve_with_lifecycle;
use crate::server::shutdown::{shutdown_signal, with_grace_period};
use crate::server::{ServerError, ServerResult};

/// Binds the listener and serves `app` until a shutdown signal arrives.
///
/// After the signal, new connections are refused and in-flight requests get
/// the configured grace period to finish.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    let server_addr = server_config.server_addr();

    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %err,
            "Failed to bind to address"
        );
        ServerError::bind_error(server_addr, err)
    })?;

    let shutdown = CancellationToken::new();
    let signal = {
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            shutdown.cancel();
        }
    };

    let grace_period = server_config.shutdown_timeout();
    serve_with_lifecycle(&server_config, || async move {
        let server = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(signal)
        .into_future();

        with_grace_period(server, shutdown, grace_period)
            .await
            .map_err(ServerError::Runtime)
    })
    .await
}
