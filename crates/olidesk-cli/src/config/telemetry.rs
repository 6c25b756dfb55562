//! Log output configuration.
//!
//! `RUST_LOG` takes precedence over `LOG_LEVEL` when both are set.

use std::fmt;

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Deployment environment; selects the log format.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Human-readable, colored output.
    #[default]
    Development,
    /// One JSON object per line.
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// Tracing subscriber configuration.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Deployment environment.
    #[arg(long, env = "ENVIRONMENT", value_enum, default_value_t = Environment::Development)]
    #[serde(default)]
    pub environment: Environment,

    /// Default filter directive, e.g. `info` or `info,olidesk_server=debug`.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_level: default_log_level(),
        }
    }
}

impl TelemetryConfig {
    /// Validates that the log level parses as a filter directive.
    pub fn validate(&self) -> anyhow::Result<()> {
        EnvFilter::try_new(&self.log_level)
            .with_context(|| format!("Log level '{}' is not a valid filter", self.log_level))?;
        Ok(())
    }

    /// Builds the filter from `RUST_LOG`, falling back to the configured level.
    pub fn env_filter(&self) -> anyhow::Result<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.log_level)
                .with_context(|| format!("Log level '{}' is not a valid filter", self.log_level)),
        }
    }

    /// Installs the global tracing subscriber.
    pub fn init_tracing(&self) -> anyhow::Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter()?);

        match self.environment {
            Environment::Production => registry
                .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
                .try_init()?,
            Environment::Development => registry
                .with(tracing_subscriber::fmt::layer())
                .try_init()?,
        }

        Ok(())
    }
}
