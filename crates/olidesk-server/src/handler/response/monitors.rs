//! Health check response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of a health probe.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    /// Whether the database answered the probe.
    pub is_healthy: bool,
    /// When the probe ran.
    pub checked_at: Timestamp,
}
