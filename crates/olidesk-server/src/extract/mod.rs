//! Request extractors with JSON error bodies.
//!
//! - [`AuthState`]: the caller identity inserted by the authentication gate
//! - [`PgPool`]: a pooled database connection
//! - [`Json`], [`Path`] and [`ValidateJson`]: drop-in replacements for the
//!   axum extractors whose rejections render as [`ErrorResponse`]
//!
//! [`ErrorResponse`]: crate::handler::response::ErrorResponse

mod auth_state;
mod pg_connection;
pub mod reject;

pub use crate::extract::auth_state::AuthState;
pub use crate::extract::pg_connection::PgPool;
pub use crate::extract::reject::{Json, Path, ValidateJson};
