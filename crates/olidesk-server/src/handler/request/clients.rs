//! Client request types.

use olidesk_postgres::types::ClientType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Contact person of a client.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInput {
    /// Contact name.
    #[validate(length(max = 255))]
    pub name: String,
    /// Contact email.
    #[validate(length(max = 254))]
    pub email: String,
    /// Contact phone.
    #[validate(length(max = 32))]
    pub phone: String,
}

/// Postal address of a client.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressInput {
    #[validate(length(max = 16))]
    pub postal_code: String,
    #[validate(length(max = 255))]
    pub neighborhood: String,
    #[validate(length(max = 255))]
    pub country: String,
    #[validate(length(max = 255))]
    pub state: String,
    #[validate(length(max = 255))]
    pub city: String,
    #[validate(length(max = 255))]
    pub street: String,
    #[validate(length(max = 32))]
    pub number: String,
    #[validate(length(max = 255))]
    pub complement: Option<String>,
}

/// Request payload to create a client.
///
/// Coordinates are never accepted from the caller; they are resolved from
/// the address.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateClient {
    /// Display name of the client.
    #[validate(length(max = 255))]
    pub client_name: String,

    /// Natural person (`fisica`) or legal entity (`juridica`).
    pub client_type: Option<ClientType>,

    /// CPF or CNPJ document number.
    #[validate(length(max = 32))]
    pub cnpj_or_cpf: String,

    #[validate(nested)]
    pub contact: ContactInput,

    #[validate(nested)]
    pub address: AddressInput,
}

/// Partial contact update.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPatch {
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 254))]
    pub email: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
}

/// Partial address update.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressPatch {
    #[validate(length(max = 16))]
    pub postal_code: Option<String>,
    #[validate(length(max = 255))]
    pub neighborhood: Option<String>,
    #[validate(length(max = 255))]
    pub country: Option<String>,
    #[validate(length(max = 255))]
    pub state: Option<String>,
    #[validate(length(max = 255))]
    pub city: Option<String>,
    #[validate(length(max = 255))]
    pub street: Option<String>,
    #[validate(length(max = 32))]
    pub number: Option<String>,
    #[validate(length(max = 255))]
    pub complement: Option<String>,
}

/// Request payload to update a client.
///
/// Absent and empty fields leave the stored value unchanged. The address is
/// geocoded again only when all of street, number, neighborhood, city,
/// state, postal code and country are supplied.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateClient {
    #[validate(length(max = 255))]
    pub client_name: Option<String>,

    pub client_type: Option<ClientType>,

    #[validate(length(max = 32))]
    pub cnpj_or_cpf: Option<String>,

    #[validate(nested)]
    pub contact: Option<ContactPatch>,

    #[validate(nested)]
    pub address: Option<AddressPatch>,
}
