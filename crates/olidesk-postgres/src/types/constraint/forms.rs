//! Forms table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Forms table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum FormConstraints {
    /// Raised both when a form points at a missing client and when a client
    /// that still has forms is deleted.
    #[strum(serialize = "forms_client_id_fkey")]
    ClientIdFkey,
}

impl FormConstraints {
    /// Creates a new [`FormConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        ConstraintCategory::Reference
    }
}

impl From<FormConstraints> for String {
    #[inline]
    fn from(val: FormConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for FormConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
