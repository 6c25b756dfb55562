//! Geocoding error to HTTP error conversion.
//!
//! Every lookup failure is an upstream problem from the caller's point of
//! view and is answered with `502 Bad Gateway`.

use olidesk_geocode::{Error as GeocodeError, ErrorKind as GeocodeErrorKind};

use super::http_error::{Error, ErrorKind};

/// Tracing target for geocoding error conversion.
const TRACING_TARGET: &str = "olidesk_server::handler::geocode";

impl From<GeocodeError> for Error<'static> {
    fn from(error: GeocodeError) -> Self {
        let message = match error.kind {
            GeocodeErrorKind::NoResultsFound => "address could not be located",
            GeocodeErrorKind::CoordinateOutOfRange => "geocoding returned invalid coordinates",
            GeocodeErrorKind::MalformedUpstreamResponse => {
                "geocoding service returned an invalid response"
            }
            GeocodeErrorKind::UpstreamUnavailable => "geocoding service is unavailable",
            GeocodeErrorKind::Configuration => "geocoding service is misconfigured",
        };

        if error.kind.is_upstream() {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                kind = %error.kind,
                "Address lookup failed"
            );
        } else {
            tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                "Address lookup is misconfigured"
            );
        }

        ErrorKind::BadGateway
            .with_message(message)
            .with_resource("client")
            .with_context(error.to_string())
    }
}
