//! Domain validation rules for users, clients and forms.
//!
//! Each check returns the first failing rule, in the order callers see them
//! documented on the API. Every rule is independent of the others.

use std::sync::LazyLock;

use regex::Regex;

/// Shape every user and contact email must match.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .unwrap_or_else(|_| unreachable!("email pattern is a valid regex"))
});

/// A domain rule that an input violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    // Users
    #[error("name is required")]
    UserName,
    #[error("email is required")]
    UserEmail,
    #[error("role is required")]
    UserRole,
    #[error("password is required")]
    UserPassword,

    // Clients
    #[error("client name is required")]
    ClientName,
    #[error("client type is required")]
    ClientType,
    #[error("cnpj or cpf is required")]
    CnpjOrCpf,
    #[error("contact name is required")]
    ContactName,
    #[error("contact email is required")]
    ContactEmail,
    #[error("contact phone is required")]
    ContactPhone,
    #[error("postal code is required")]
    PostalCode,
    #[error("country is required")]
    Country,
    #[error("state is required")]
    State,
    #[error("city is required")]
    City,
    #[error("street is required")]
    Street,
    #[error("number is required")]
    Number,

    // Forms
    #[error("defect invalid")]
    DefectDescription,
    #[error("invalid difficulty level")]
    DifficultyLevel,
    #[error("invalid solicited by")]
    SolicitedBy,
    #[error("invalid client ID")]
    ClientId,
    #[error("invalid technician responsible ID")]
    Technicians,
    #[error("invalid open date")]
    OpenedAt,
    #[error("solution description invalid")]
    SolutionDescription,
}

impl ValidationError {
    /// Returns the field the rule applies to, in request (camelCase) naming.
    pub const fn field(self) -> &'static str {
        match self {
            Self::UserName => "name",
            Self::UserEmail => "email",
            Self::UserRole => "role",
            Self::UserPassword => "password",
            Self::ClientName => "clientName",
            Self::ClientType => "clientType",
            Self::CnpjOrCpf => "cnpjOrCpf",
            Self::ContactName => "contact.name",
            Self::ContactEmail => "contact.email",
            Self::ContactPhone => "contact.phone",
            Self::PostalCode => "address.postalCode",
            Self::Country => "address.country",
            Self::State => "address.state",
            Self::City => "address.city",
            Self::Street => "address.street",
            Self::Number => "address.number",
            Self::DefectDescription => "defectDescription",
            Self::DifficultyLevel => "difficultyLevel",
            Self::SolicitedBy => "solicitedBy",
            Self::ClientId => "clientId",
            Self::Technicians => "technicianIds",
            Self::OpenedAt => "openedAt",
            Self::SolutionDescription => "solutionDescription",
        }
    }
}

/// Returns whether a string is empty after trimming.
#[inline]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns whether an email matches the accepted shape.
#[inline]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Fails with `error` when `value` is blank.
#[inline]
pub fn require(value: &str, error: ValidationError) -> Result<(), ValidationError> {
    if is_blank(value) { Err(error) } else { Ok(()) }
}

/// Drops blank strings and trims the rest.
///
/// Update payloads use this so that an empty string leaves the stored value
/// untouched instead of clearing it.
#[inline]
pub fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Lowercases and trims an email for storage and lookup.
#[inline]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
