#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use olidesk_server::handler::routes;
use olidesk_server::middleware::{RouterExt, RouterOpenApiExt};
use olidesk_server::service::{ServiceConfig, ServiceState};

use crate::config::{Cli, MiddlewareConfig};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "olidesk_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "olidesk_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "olidesk_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "Application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = format!("{error:#}"),
            "Application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    cli.telemetry
        .init_tracing()
        .context("failed to initialize tracing")?;

    cli.log();
    cli.validate()?;

    let state = create_service_state(&cli.service).await?;
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Connects to every backing service and creates the bootstrap user.
async fn create_service_state(config: &ServiceConfig) -> anyhow::Result<ServiceState> {
    ServiceState::from_config(config)
        .await
        .context("failed to create service state")
}

/// Creates the router with all middleware layers applied.
///
/// Layers added last run first:
/// 1. Recovery (outermost): catches panics and enforces the request timeout
/// 2. Observability: request ids and access logging
/// 3. CORS
/// 4. Routes (innermost), with the authentication gate on `/api/v1`
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes(&state)
        .with_open_api(&middleware.openapi)
        .with_state(state)
        .with_cors_layer(&middleware.cors)
        .with_observability_layer()
        .with_recovery_layer(&middleware.recovery)
}
