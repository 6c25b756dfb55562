use std::future::ready;

use axum::response::{IntoResponse, Response};
use futures::future::{BoxFuture, FutureExt};
use tower::timeout::error::Elapsed;

use super::TRACING_TARGET;
use crate::handler::{Error, ErrorKind};

type ResponseFut = BoxFuture<'static, Response>;

/// Transforms a [`tower::BoxError`] into an [`Error`] response.
///
/// A request that exceeds its timeout becomes `504`; anything else is `500`.
pub fn handle_error(err: tower::BoxError) -> ResponseFut {
    let error = if err.is::<Elapsed>() {
        tracing::warn!(
            target: TRACING_TARGET,
            error = %err,
            "Request timeout exceeded"
        );

        Error::new(ErrorKind::GatewayTimeout).with_message("request timed out")
    } else {
        tracing::error!(
            target: TRACING_TARGET,
            error = %err,
            "Unknown middleware error"
        );

        Error::new(ErrorKind::InternalServerError).with_context(err.to_string())
    };

    ready(error.into_response()).boxed()
}
