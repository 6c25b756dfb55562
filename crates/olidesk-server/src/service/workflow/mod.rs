//! Request workflows behind the HTTP handlers.
//!
//! Workflows are generic over the repository traits so the same code runs
//! against a pooled Postgres connection and, in tests, an in-memory store.
//! Every mutating workflow takes the authenticated [`CallerIdentity`]
//! explicitly.
//!
//! [`CallerIdentity`]: crate::service::security::CallerIdentity

pub mod clients;
pub mod forms;
pub mod users;
mod validation;

#[cfg(test)]
pub(crate) mod memory;

pub use validation::ValidationError;
