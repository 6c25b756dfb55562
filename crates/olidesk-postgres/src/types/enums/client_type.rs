//! Client type enumeration: natural person or legal entity.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Whether a client is a natural person (identified by CPF) or a legal
/// entity (identified by CNPJ).
///
/// Corresponds to the `CLIENT_TYPE` PostgreSQL enum.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::ClientType"]
pub enum ClientType {
    /// Natural person (pessoa física).
    #[db_rename = "fisica"]
    #[serde(rename = "fisica")]
    #[strum(serialize = "fisica")]
    Fisica,

    /// Legal entity (pessoa jurídica).
    #[db_rename = "juridica"]
    #[serde(rename = "juridica")]
    #[strum(serialize = "juridica")]
    Juridica,
}

impl ClientType {
    /// Returns the canonical lowercase name.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            ClientType::Fisica => "fisica",
            ClientType::Juridica => "juridica",
        }
    }

    /// Returns whether the tax document is expected to be a CNPJ.
    #[inline]
    pub const fn is_legal_entity(self) -> bool {
        matches!(self, ClientType::Juridica)
    }
}
