//! Error types for the reqwest-based lookup client.

use thiserror::Error;

/// Result type alias for reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Response body could not be decoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<Error> for crate::Error {
    fn from(err: Error) -> Self {
        use crate::ErrorKind;

        match err {
            Error::Reqwest(e) => {
                let message = if e.is_timeout() {
                    "lookup timed out".to_owned()
                } else if e.is_connect() {
                    "connection failed".to_owned()
                } else if let Some(status) = e.status() {
                    format!("upstream returned {status}")
                } else {
                    e.to_string()
                };

                crate::Error::from_source(ErrorKind::UpstreamUnavailable, e).with_message(message)
            }
            Error::Serde(e) => crate::Error::new(ErrorKind::MalformedUpstreamResponse)
                .with_message(e.to_string())
                .with_source(e),
        }
    }
}
