//! Nominatim client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, ErrorKind, Result};

/// Default search endpoint.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Default timeout for a lookup: 10 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent header; Nominatim's usage policy requires one.
pub const DEFAULT_USER_AGENT: &str = "OlideskAPI/1.0";

const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 60;

/// Configuration for the Nominatim lookup client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct NominatimConfig {
    /// Search endpoint of a Nominatim-compatible service
    #[cfg_attr(
        feature = "config",
        arg(
            long = "nominatim-url",
            env = "NOMINATIM_URL",
            default_value = DEFAULT_NOMINATIM_URL
        )
    )]
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// Lookup timeout in seconds (1-60)
    #[cfg_attr(
        feature = "config",
        arg(
            long = "geocode-timeout-secs",
            env = "GEOCODE_TIMEOUT_SECS",
            default_value_t = DEFAULT_TIMEOUT_SECS
        )
    )]
    #[serde(default = "default_timeout_secs")]
    pub geocode_timeout_secs: u64,

    /// User-Agent header sent with every lookup
    #[cfg_attr(
        feature = "config",
        arg(
            long = "geocode-user-agent",
            env = "GEOCODE_USER_AGENT",
            default_value = DEFAULT_USER_AGENT
        )
    )]
    #[serde(default = "default_user_agent")]
    pub geocode_user_agent: String,
}

fn default_nominatim_url() -> String {
    DEFAULT_NOMINATIM_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            nominatim_url: default_nominatim_url(),
            geocode_timeout_secs: default_timeout_secs(),
            geocode_user_agent: default_user_agent(),
        }
    }
}

impl NominatimConfig {
    /// Creates a configuration pointing at the given endpoint.
    pub fn new(nominatim_url: impl Into<String>) -> Self {
        Self {
            nominatim_url: nominatim_url.into(),
            ..Self::default()
        }
    }

    /// Returns the timeout as a Duration.
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.geocode_timeout_secs)
    }

    /// Parses the configured endpoint.
    pub fn endpoint(&self) -> Result<Url> {
        Url::parse(&self.nominatim_url).map_err(|e| {
            Error::from_source(ErrorKind::Configuration, e)
                .with_message(format!("invalid nominatim url: {}", self.nominatim_url))
        })
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.geocode_timeout_secs = timeout_secs;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.geocode_user_agent = user_agent.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.endpoint()?;

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.geocode_timeout_secs) {
            return Err(Error::new(ErrorKind::Configuration).with_message(format!(
                "geocode_timeout_secs must be between {MIN_TIMEOUT_SECS} and {MAX_TIMEOUT_SECS}"
            )));
        }

        if self.geocode_user_agent.trim().is_empty() {
            return Err(Error::new(ErrorKind::Configuration)
                .with_message("geocode_user_agent cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NominatimConfig::default();
        assert_eq!(config.nominatim_url, DEFAULT_NOMINATIM_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.geocode_user_agent, "OlideskAPI/1.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_invalid_values() {
        let config = NominatimConfig::new("not a url");
        assert_eq!(
            config.validate().unwrap_err().kind,
            ErrorKind::Configuration
        );

        assert!(NominatimConfig::default().with_timeout_secs(0).validate().is_err());
        assert!(NominatimConfig::default().with_timeout_secs(61).validate().is_err());
        assert!(NominatimConfig::default().with_user_agent(" ").validate().is_err());
    }
}
