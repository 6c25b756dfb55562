//! Database constraint violations organized by table.

mod clients;
mod form_technicians;
mod forms;
mod members;
mod users;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::clients::ClientConstraints;
pub use self::form_technicians::FormTechnicianConstraints;
pub use self::forms::FormConstraints;
pub use self::members::MemberConstraints;
pub use self::users::UserConstraints;

/// Any known database constraint, tagged by the table it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    User(UserConstraints),
    Member(MemberConstraints),
    Client(ClientConstraints),
    Form(FormConstraints),
    FormTechnician(FormTechnicianConstraints),
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (non-empty, range checks).
    Validation,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
    /// Foreign key constraints.
    Reference,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// Returns `None` if the constraint name is not recognized.
    ///
    /// ```
    /// use olidesk_postgres::types::ConstraintViolation;
    ///
    /// let violation = ConstraintViolation::new("users_email_unique_idx");
    /// assert!(violation.is_some());
    ///
    /// let unknown = ConstraintViolation::new("unknown_constraint");
    /// assert!(unknown.is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        let prefix = constraint.split('_').next()?;

        match prefix {
            "users" => UserConstraints::new(constraint).map(Self::User),
            "members" => MemberConstraints::new(constraint).map(Self::Member),
            "clients" => ClientConstraints::new(constraint).map(Self::Client),
            "forms" => FormConstraints::new(constraint).map(Self::Form),
            "form" => FormTechnicianConstraints::new(constraint).map(Self::FormTechnician),
            _ => None,
        }
    }

    /// Returns the table name associated with this constraint.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::User(_) => "users",
            ConstraintViolation::Member(_) => "members",
            ConstraintViolation::Client(_) => "clients",
            ConstraintViolation::Form(_) => "forms",
            ConstraintViolation::FormTechnician(_) => "form_technicians",
        }
    }

    /// Returns the category of this constraint violation.
    pub fn constraint_category(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::User(c) => c.categorize(),
            ConstraintViolation::Member(c) => c.categorize(),
            ConstraintViolation::Client(c) => c.categorize(),
            ConstraintViolation::Form(c) => c.categorize(),
            ConstraintViolation::FormTechnician(c) => c.categorize(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::User(c) => write!(f, "{c}"),
            ConstraintViolation::Member(c) => write!(f, "{c}"),
            ConstraintViolation::Client(c) => write!(f, "{c}"),
            ConstraintViolation::Form(c) => write!(f, "{c}"),
            ConstraintViolation::FormTechnician(c) => write!(f, "{c}"),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("Unknown constraint: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn parses_known_constraints() {
        assert_eq!(
            ConstraintViolation::new("users_email_unique_idx"),
            Some(ConstraintViolation::User(UserConstraints::EmailUnique))
        );
        assert_eq!(
            ConstraintViolation::new("forms_client_id_fkey"),
            Some(ConstraintViolation::Form(FormConstraints::ClientIdFkey))
        );
        assert_eq!(
            ConstraintViolation::new("form_technicians_member_id_fkey"),
            Some(ConstraintViolation::FormTechnician(
                FormTechnicianConstraints::MemberIdFkey
            ))
        );
        assert_eq!(ConstraintViolation::new("unknown_constraint"), None);
        assert_eq!(ConstraintViolation::new("forms_unknown"), None);
    }

    #[test]
    fn every_constraint_round_trips_through_its_name() {
        let all = UserConstraints::iter()
            .map(ConstraintViolation::User)
            .chain(MemberConstraints::iter().map(ConstraintViolation::Member))
            .chain(ClientConstraints::iter().map(ConstraintViolation::Client))
            .chain(FormConstraints::iter().map(ConstraintViolation::Form))
            .chain(FormTechnicianConstraints::iter().map(ConstraintViolation::FormTechnician));

        for violation in all {
            let name = violation.to_string();
            assert!(name.starts_with(violation.table_name()), "{name}");
            assert_eq!(ConstraintViolation::new(&name), Some(violation));
        }
    }

    #[test]
    fn categorizes_constraints() {
        let violation = ConstraintViolation::User(UserConstraints::EmailUnique);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Uniqueness
        );

        let violation = ConstraintViolation::Form(FormConstraints::ClientIdFkey);
        assert_eq!(violation.constraint_category(), ConstraintCategory::Reference);
    }
}
