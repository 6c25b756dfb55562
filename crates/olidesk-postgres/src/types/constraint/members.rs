//! Members table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Members table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum MemberConstraints {
    #[strum(serialize = "members_role_not_empty")]
    RoleNotEmpty,

    #[strum(serialize = "members_user_id_unique")]
    UserIdUnique,

    #[strum(serialize = "members_user_id_fkey")]
    UserIdFkey,
}

impl MemberConstraints {
    /// Creates a new [`MemberConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            MemberConstraints::RoleNotEmpty => ConstraintCategory::Validation,
            MemberConstraints::UserIdUnique => ConstraintCategory::Uniqueness,
            MemberConstraints::UserIdFkey => ConstraintCategory::Reference,
        }
    }
}

impl From<MemberConstraints> for String {
    #[inline]
    fn from(val: MemberConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for MemberConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
