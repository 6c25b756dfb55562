//! Geocoding service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::{AddressQuery, Coordinates, GeocodeProvider, Result, TRACING_TARGET};

/// Geocoding service wrapper with observability.
///
/// Adds structured logging with timing to any [`GeocodeProvider`].
/// The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct GeocodeService {
    inner: Arc<dyn GeocodeProvider>,
}

impl fmt::Debug for GeocodeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodeService").finish_non_exhaustive()
    }
}

impl GeocodeService {
    /// Create a new geocoding service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: GeocodeProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Resolves an address into coordinates.
    pub async fn geocode(&self, query: &AddressQuery) -> Result<Coordinates> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            city = %query.city,
            state = %query.state,
            country = %query.country,
            "Geocoding address"
        );

        let result = self.inner.geocode(query).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(coordinates) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    latitude = coordinates.latitude(),
                    longitude = coordinates.longitude(),
                    elapsed_ms = elapsed.as_millis(),
                    "Address geocoded"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    kind = %error.kind,
                    elapsed_ms = elapsed.as_millis(),
                    "Geocoding failed"
                );
            }
        }

        result
    }
}
