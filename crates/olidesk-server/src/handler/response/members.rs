//! Member response types.

use olidesk_postgres::model::MemberSummary;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member as listed to other users.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Member identifier, used as a technician id on forms.
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<MemberSummary> for Member {
    fn from(summary: MemberSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            email: summary.email,
            role: summary.role,
        }
    }
}

/// All members, ordered by name.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Members {
    pub members: Vec<Member>,
}

impl Members {
    /// Creates the list response from database rows.
    pub fn from_models(models: Vec<MemberSummary>) -> Self {
        Self {
            members: models.into_iter().map(Member::from).collect(),
        }
    }
}
