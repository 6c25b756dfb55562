//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig          # Host, port, shutdown grace period
//! ├── middleware: MiddlewareConfig  # CORS, OpenAPI, request timeout
//! ├── telemetry: TelemetryConfig    # Environment, log level
//! └── service: ServiceConfig        # Postgres, JWT secret, geocoding, bootstrap user
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Configure database and server
//! olidesk --postgres-url "postgresql://..." --jwt-secret "..." --port 8080
//!
//! # Or via environment variables
//! POSTGRES_URL="postgresql://..." JWT_SECRET="..." PORT=8080 olidesk
//! ```

mod middleware;
mod server;
mod telemetry;

use std::process;

use anyhow::Context;
use clap::Parser;
pub use middleware::MiddlewareConfig;
use olidesk_server::service::ServiceConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
pub use telemetry::{Environment, TelemetryConfig};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
///
/// Combines all configuration groups for the olidesk server:
/// - [`ServerConfig`]: network binding and shutdown
/// - [`MiddlewareConfig`]: CORS, OpenAPI paths and request timeout
/// - [`TelemetryConfig`]: log format and filtering
/// - [`ServiceConfig`]: Postgres, signing secret, geocoding and bootstrap user
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "olidesk")]
#[command(about = "Olidesk helpdesk API server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, OpenAPI, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Log output configuration.
    #[clap(flatten)]
    pub telemetry: TelemetryConfig,

    /// Backing service configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is read before clap parses arguments, so its values act
    /// as environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.middleware
            .validate()
            .context("invalid middleware configuration")?;
        self.telemetry
            .validate()
            .context("invalid telemetry configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            environment = %self.telemetry.environment,
            "Starting olidesk server"
        );

        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        let postgres = &self.service.postgres_config;
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            postgres_url = %postgres.database_url_masked(),
            postgres_max_connections = postgres.postgres_max_connections,
            postgres_connection_timeout_secs = ?postgres.postgres_connection_timeout_secs,
            postgres_idle_timeout_secs = ?postgres.postgres_idle_timeout_secs,
            "Database configuration"
        );

        let geocode = &self.service.geocode_config;
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            nominatim_url = %geocode.nominatim_url,
            timeout_secs = geocode.geocode_timeout_secs,
            user_agent = %geocode.geocode_user_agent,
            "Geocoding configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            bootstrap_user = self.service.bootstrap_user.is_complete(),
            "Bootstrap configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Cli> {
        let argv = ["olidesk"].iter().chain(args);
        Ok(Cli::try_parse_from(argv)?)
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_fill_every_group() -> anyhow::Result<()> {
        let cli = parse(&[
            "--postgres-url",
            "postgresql://olidesk:secret@db:5432/olidesk",
            "--jwt-secret",
            "a-long-development-secret",
            "--port",
            "9090",
            "--environment",
            "production",
            "--request-timeout",
            "45",
        ])?;

        assert_eq!(cli.server.port, 9090);
        assert_eq!(cli.telemetry.environment, Environment::Production);
        assert_eq!(cli.middleware.recovery.request_timeout, 45);
        assert_eq!(cli.middleware.openapi.scalar_ui, "/docs");
        cli.validate()?;
        Ok(())
    }

    #[test]
    fn short_secret_fails_validation() -> anyhow::Result<()> {
        let cli = parse(&[
            "--postgres-url",
            "postgresql://olidesk:secret@db:5432/olidesk",
            "--jwt-secret",
            "short",
        ])?;

        let error = cli
            .validate()
            .err()
            .context("a short secret must be rejected")?;
        assert!(format!("{error:#}").contains("invalid service configuration"));
        Ok(())
    }
}
