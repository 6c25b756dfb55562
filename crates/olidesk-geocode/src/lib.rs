#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod query;
mod service;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use query::{AddressQuery, Coordinates};
pub use service::GeocodeService;

/// Tracing target for geocoding operations.
pub const TRACING_TARGET: &str = "olidesk_geocode::service";

/// Core trait for address lookups.
///
/// Implement this trait to plug a different lookup backend (or a stub in
/// tests) behind [`GeocodeService`].
#[async_trait::async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Resolves an address into validated coordinates.
    async fn geocode(&self, query: &AddressQuery) -> Result<Coordinates>;
}
