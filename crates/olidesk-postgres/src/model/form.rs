//! Form (service ticket) model.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use super::TechnicianSummary;
use crate::schema::forms;

/// A service ticket opened for a client.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = forms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Form {
    /// Unique form identifier.
    pub id: Uuid,
    /// Client the ticket was opened for.
    pub client_id: Uuid,
    /// When the ticket was opened.
    pub opened_at: Timestamp,
    /// Who requested the service.
    pub solicited_by: String,
    /// Free-form difficulty tag.
    pub difficulty_level: String,
    /// Reported defect.
    pub defect_description: String,
    /// Applied solution.
    pub solution_description: String,
    /// Timestamp when the form was created.
    pub created_at: Timestamp,
    /// Timestamp when the form was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new form.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = forms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewForm {
    pub client_id: Uuid,
    pub opened_at: Timestamp,
    pub solicited_by: String,
    pub difficulty_level: String,
    pub defect_description: String,
    pub solution_description: String,
}

/// Sparse changeset for a form; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = forms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateForm {
    pub client_id: Option<Uuid>,
    pub opened_at: Option<Timestamp>,
    pub solicited_by: Option<String>,
    pub difficulty_level: Option<String>,
    pub defect_description: Option<String>,
    pub solution_description: Option<String>,
    pub updated_at: Option<Timestamp>,
}

impl UpdateForm {
    /// Applies the changeset to an in-memory form.
    pub fn apply_to(self, form: &mut Form) {
        macro_rules! apply {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(value) = self.$field {
                    form.$field = value;
                })+
            };
        }

        apply!(
            client_id,
            opened_at,
            solicited_by,
            difficulty_level,
            defect_description,
            solution_description,
            updated_at,
        );
    }
}

/// A form with its client name and assigned technicians resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDetails {
    /// The form row.
    pub form: Form,
    /// Name of the client referenced by `form.client_id`.
    pub client_name: String,
    /// Assigned technicians, ordered by name.
    pub technicians: Vec<TechnicianSummary>,
}
