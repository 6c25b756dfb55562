//! Form (service ticket) request types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request payload to open a form.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateForm {
    /// Members assigned to the ticket. Duplicates are collapsed.
    #[validate(length(max = 64))]
    pub technician_ids: Vec<Uuid>,

    /// When the ticket was opened.
    pub opened_at: Option<Timestamp>,

    /// Client the ticket belongs to.
    pub client_id: Uuid,

    /// Who requested the service.
    #[validate(length(max = 255))]
    pub solicited_by: String,

    /// Free-form difficulty label.
    #[validate(length(max = 64))]
    pub difficulty_level: String,

    /// Reported defect.
    #[validate(length(max = 10000))]
    pub defect_description: String,

    /// Applied solution.
    #[validate(length(max = 10000))]
    pub solution_description: String,
}

/// Request payload to update a form.
///
/// A non-empty `technicianIds` replaces the assigned set; absent or empty
/// keeps it.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateForm {
    #[validate(length(max = 64))]
    pub technician_ids: Option<Vec<Uuid>>,
    pub opened_at: Option<Timestamp>,
    pub client_id: Option<Uuid>,
    #[validate(length(max = 255))]
    pub solicited_by: Option<String>,
    #[validate(length(max = 64))]
    pub difficulty_level: Option<String>,
    #[validate(length(max = 10000))]
    pub defect_description: Option<String>,
    #[validate(length(max = 10000))]
    pub solution_description: Option<String>,
}
