//! Response types for HTTP handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod clients;
mod errors;
mod forms;
mod members;
mod monitors;
mod users;

pub use clients::*;
pub use errors::*;
pub use forms::*;
pub use members::*;
pub use monitors::*;
pub use users::*;

/// Acknowledges a created resource.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Created {
    /// Identifier of the new resource.
    pub id: Uuid,
    /// Human-readable confirmation.
    pub message: String,
}

impl Created {
    /// Creates a new acknowledgement.
    pub fn new(id: Uuid, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}

/// A bare confirmation message.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Human-readable confirmation.
    pub message: String,
}

impl Message {
    /// Creates a new confirmation.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
