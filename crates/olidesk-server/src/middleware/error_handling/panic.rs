use std::any::Any;

use axum::response::{IntoResponse, Response};

use super::TRACING_TARGET;
use crate::handler::ErrorKind;

type Panic = Box<dyn Any + Send + 'static>;

/// Transforms a handler panic into a `500` response.
pub fn catch_panic(err: Panic) -> Response {
    let detail = if let Some(panic) = err.downcast_ref::<String>() {
        panic.as_str()
    } else if let Some(panic) = err.downcast_ref::<&str>() {
        panic
    } else {
        "unknown panic type"
    };

    tracing::error!(
        target: TRACING_TARGET,
        panic = detail,
        "Service panic"
    );

    ErrorKind::InternalServerError.into_response()
}
