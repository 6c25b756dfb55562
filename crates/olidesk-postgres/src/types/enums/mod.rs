//! Enumerations mirrored by PostgreSQL enum types.

mod client_type;

pub use client_type::ClientType;
