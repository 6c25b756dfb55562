//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - the authentication gate for `/api/v1`
//! - CORS, request ids and access logging
//! - panic and timeout recovery
//! - OpenAPI documentation

mod auth;
mod cors;
mod error_handling;
mod extensions;
mod observability;
mod recovery;
mod specification;

pub use auth::{AuthGate, LOGIN_PATH, PublicRoutes, TRACING_TARGET_AUTH, require_authentication};
pub use cors::CorsConfig;
pub use extensions::RouterExt;
pub use observability::REQUEST_ID_HEADER;
pub use recovery::RecoveryConfig;
pub use specification::{OpenApiConfig, RouterOpenApiExt};
