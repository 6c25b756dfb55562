//! Form response types.

use jiff::Timestamp;
use olidesk_postgres::model::{FormDetails, TechnicianSummary};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The client a form belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormClient {
    pub id: Uuid,
    pub client_name: String,
}

/// A technician assigned to a form.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    /// Member identifier.
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<TechnicianSummary> for Technician {
    fn from(summary: TechnicianSummary) -> Self {
        Self {
            id: summary.member_id,
            name: summary.name,
            email: summary.email,
        }
    }
}

/// Represents a form (service ticket).
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: Uuid,
    pub client: FormClient,
    pub opened_at: Timestamp,
    pub solicited_by: String,
    pub difficulty_level: String,
    pub defect_description: String,
    pub solution_description: String,
    /// Assigned technicians, ordered by name.
    pub technicians: Vec<Technician>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<FormDetails> for Form {
    fn from(details: FormDetails) -> Self {
        let FormDetails {
            form,
            client_name,
            technicians,
        } = details;

        Self {
            id: form.id,
            client: FormClient {
                id: form.client_id,
                client_name,
            },
            opened_at: form.opened_at.into(),
            solicited_by: form.solicited_by,
            difficulty_level: form.difficulty_level,
            defect_description: form.defect_description,
            solution_description: form.solution_description,
            technicians: technicians.into_iter().map(Technician::from).collect(),
            created_at: form.created_at.into(),
            updated_at: form.updated_at.into(),
        }
    }
}

/// All forms.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Forms {
    pub forms: Vec<Form>,
}

impl Forms {
    /// Creates the list response from joined rows.
    pub fn from_models(models: Vec<FormDetails>) -> Self {
        Self {
            forms: models.into_iter().map(Form::from).collect(),
        }
    }
}
