//! Form technicians table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Form technicians table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum FormTechnicianConstraints {
    #[strum(serialize = "form_technicians_pkey")]
    PrimaryKey,

    #[strum(serialize = "form_technicians_form_id_fkey")]
    FormIdFkey,
    #[strum(serialize = "form_technicians_member_id_fkey")]
    MemberIdFkey,
}

impl FormTechnicianConstraints {
    /// Creates a new [`FormTechnicianConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            FormTechnicianConstraints::PrimaryKey => ConstraintCategory::Uniqueness,
            FormTechnicianConstraints::FormIdFkey | FormTechnicianConstraints::MemberIdFkey => {
                ConstraintCategory::Reference
            }
        }
    }
}

impl From<FormTechnicianConstraints> for String {
    #[inline]
    fn from(val: FormTechnicianConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for FormTechnicianConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
