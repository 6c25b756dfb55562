//! Reqwest-based lookup client for Nominatim-compatible endpoints.
//!
//! This module provides a reqwest-based implementation of the
//! [`GeocodeProvider`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use olidesk_geocode::reqwest::{NominatimClient, NominatimConfig};
//! use olidesk_geocode::GeocodeService;
//!
//! let client = NominatimClient::new(NominatimConfig::default())?;
//!
//! // Convert to a service for dependency injection
//! let service: GeocodeService = client.into_service();
//! ```
//!
//! [`GeocodeProvider`]: crate::GeocodeProvider

mod client;
mod config;
mod error;

pub use client::NominatimClient;
pub use config::NominatimConfig;
pub use error::{Error, Result};

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "olidesk_geocode::reqwest";
