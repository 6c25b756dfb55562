//! Clients table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Clients table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum ClientConstraints {
    #[strum(serialize = "clients_latitude_range")]
    LatitudeRange,
    #[strum(serialize = "clients_longitude_range")]
    LongitudeRange,
}

impl ClientConstraints {
    /// Creates a new [`ClientConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        ConstraintCategory::Validation
    }
}

impl From<ClientConstraints> for String {
    #[inline]
    fn from(val: ClientConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ClientConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
