//! [`Error`], [`ErrorKind`] and [`Result`].

mod geocode_error;
mod http_error;
mod pg_constraints;
mod pg_error;
mod token_error;
mod validation_error;

pub use http_error::{Error, ErrorKind, Result};
