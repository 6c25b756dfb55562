//! Extension trait for `axum::Router` to apply middleware layers.

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower_http::catch_panic::CatchPanicLayer;

use crate::middleware::cors::{CorsConfig, create_cors_layer};
use crate::middleware::error_handling::{catch_panic, handle_error};
use crate::middleware::observability::{
    create_propagate_request_id_layer, create_request_id_layer, create_sensitive_headers_layer,
    create_trace_layer,
};
use crate::middleware::recovery::RecoveryConfig;

/// Extension trait for `axum::`[`Router`] for layering middleware.
///
/// Layers added later wrap the ones added earlier, so the outermost stack
/// is applied last:
///
/// ```rust,ignore
/// router
///     .with_cors_layer(&cors)
///     .with_observability_layer()
///     .with_recovery_layer(&recovery)
/// ```
pub trait RouterExt<S> {
    /// Layers [`HandleError`], [`CatchPanic`] and [`Timeout`] middlewares.
    ///
    /// [`HandleError`]: axum::error_handling::HandleErrorLayer
    /// [`CatchPanic`]: tower_http::catch_panic::CatchPanicLayer
    /// [`Timeout`]: tower::timeout::TimeoutLayer
    fn with_recovery_layer(self, config: &RecoveryConfig) -> Self;

    /// Layers request id generation, access logging and request id
    /// propagation, with credentials redacted from the log.
    fn with_observability_layer(self) -> Self;

    /// Layers the CORS policy.
    fn with_cors_layer(self, config: &CorsConfig) -> Self;
}

impl<S> RouterExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery_layer(self, config: &RecoveryConfig) -> Self {
        let middlewares = ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_error))
            .layer(CatchPanicLayer::custom(catch_panic))
            .layer(TimeoutLayer::new(config.request_timeout()));

        self.layer(middlewares)
    }

    fn with_observability_layer(self) -> Self {
        self.layer(create_propagate_request_id_layer())
            .layer(create_sensitive_headers_layer())
            .layer(create_trace_layer())
            .layer(create_request_id_layer())
    }

    fn with_cors_layer(self, config: &CorsConfig) -> Self {
        self.layer(create_cors_layer(config))
    }
}
