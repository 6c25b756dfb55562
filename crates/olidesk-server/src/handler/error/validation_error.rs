//! Domain validation error to HTTP error conversion.

use super::http_error::{Error, ErrorKind};
use crate::service::workflow::ValidationError;

impl From<ValidationError> for Error<'static> {
    fn from(error: ValidationError) -> Self {
        ErrorKind::BadRequest
            .with_message(error.to_string())
            .with_context(format!("field: {}", error.field()))
    }
}
