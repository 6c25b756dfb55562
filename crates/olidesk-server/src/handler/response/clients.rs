//! Client response types.

use jiff::Timestamp;
use olidesk_postgres::model::Client as ClientModel;
use olidesk_postgres::types::ClientType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact person of a client.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Address of a client with its resolved coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub postal_code: String,
    pub neighborhood: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Represents a client.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub client_name: String,
    pub client_type: ClientType,
    pub cnpj_or_cpf: String,
    pub contact: Contact,
    pub address: Address,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ClientModel> for Client {
    fn from(client: ClientModel) -> Self {
        Self {
            id: client.id,
            client_name: client.client_name,
            client_type: client.client_type,
            cnpj_or_cpf: client.cnpj_or_cpf,
            contact: Contact {
                name: client.contact_name,
                email: client.contact_email,
                phone: client.contact_phone,
            },
            address: Address {
                postal_code: client.postal_code,
                neighborhood: client.neighborhood,
                country: client.country,
                state: client.state,
                city: client.city,
                street: client.street,
                number: client.number,
                complement: client.complement,
                latitude: client.latitude,
                longitude: client.longitude,
            },
            created_at: client.created_at.into(),
            updated_at: client.updated_at.into(),
        }
    }
}

/// All clients, newest first.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Clients {
    pub clients: Vec<Client>,
}

impl Clients {
    /// Creates the list response from database rows.
    pub fn from_models(models: Vec<ClientModel>) -> Self {
        Self {
            clients: models.into_iter().map(Client::from).collect(),
        }
    }
}
