//! Association between forms and the members assigned to them.

use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::form_technicians;

/// Data for assigning a member to a form.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = form_technicians)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewFormTechnician {
    pub form_id: Uuid,
    pub member_id: Uuid,
}

impl NewFormTechnician {
    /// Builds one assignment row per member.
    pub fn for_members(form_id: Uuid, member_ids: &[Uuid]) -> Vec<Self> {
        member_ids
            .iter()
            .map(|&member_id| Self { form_id, member_id })
            .collect()
    }
}

/// Assigned technician resolved through `members` and `users`.
#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct TechnicianSummary {
    /// Form the technician is assigned to.
    pub form_id: Uuid,
    /// Member identifier.
    pub member_id: Uuid,
    /// User display name.
    pub name: String,
    /// User email.
    pub email: String,
}
