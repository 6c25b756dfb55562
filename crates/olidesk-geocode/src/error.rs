//! Structured error handling for geocoding operations.

use std::borrow::Cow;

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur during a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Transport failure, timeout, or non-success status from the upstream.
    UpstreamUnavailable,
    /// The upstream answered with zero candidates.
    NoResultsFound,
    /// The upstream payload could not be decoded.
    MalformedUpstreamResponse,
    /// A returned coordinate lies outside its valid range.
    CoordinateOutOfRange,
    /// The lookup client could not be configured.
    Configuration,
}

impl ErrorKind {
    /// Returns whether the failure came from the upstream service rather
    /// than from local configuration.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        !matches!(self, Self::Configuration)
    }
}

/// Structured error type with classification and an optional source.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<Cow<'static, str>>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn builder_sets_message_and_source() {
        let error = Error::new(ErrorKind::NoResultsFound).with_message("nothing matched");
        assert_eq!(error.kind, ErrorKind::NoResultsFound);
        assert_eq!(error.message.as_deref(), Some("nothing matched"));
        assert!(error.source.is_none());

        let error = Error::from_source(
            ErrorKind::UpstreamUnavailable,
            std::io::Error::other("connection reset"),
        );
        assert!(error.source.is_some());
    }

    #[test]
    fn display_includes_kind_and_message() {
        let error = Error::new(ErrorKind::CoordinateOutOfRange).with_message("latitude 91");
        assert_eq!(error.to_string(), "[coordinate_out_of_range]: latitude 91");

        let error = Error::new(ErrorKind::NoResultsFound);
        assert_eq!(error.to_string(), "[no_results_found]");
    }

    #[test]
    fn kinds_parse_from_snake_case() {
        assert_eq!(
            ErrorKind::from_str("malformed_upstream_response").ok(),
            Some(ErrorKind::MalformedUpstreamResponse)
        );
        assert!(ErrorKind::from_str("timeout").is_err());
    }

    #[test]
    fn configuration_is_not_upstream() {
        assert!(ErrorKind::UpstreamUnavailable.is_upstream());
        assert!(ErrorKind::NoResultsFound.is_upstream());
        assert!(!ErrorKind::Configuration.is_upstream());
    }
}
