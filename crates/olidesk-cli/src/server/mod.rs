//! HTTP server startup, lifecycle logging and graceful shutdown.

mod error;
mod http_server;
mod lifecycle;
mod shutdown;

use axum::Router;
pub use error::{ServerError, ServerResult};
use http_server::serve_http;

use crate::config::ServerConfig;

/// Starts the HTTP server and blocks until it shuts down.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the accept loop fails.
pub async fn serve(app: Router, config: ServerConfig) -> ServerResult<()> {
    serve_http(app, config).await
}
