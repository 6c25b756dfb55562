//! Turns tower errors and handler panics into JSON error responses.

mod handlers;
mod panic;

pub use handlers::handle_error;
pub use panic::catch_panic;

/// Tracing target for middleware failures.
const TRACING_TARGET: &str = "olidesk_server::middleware::error";
