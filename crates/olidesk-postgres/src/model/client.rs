//! Client model for customer records.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::clients;
use crate::types::ClientType;

/// A customer with its contact person and geocoded address.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Client {
    /// Unique client identifier.
    pub id: Uuid,
    /// Client (company or person) name.
    pub client_name: String,
    /// Natural person or legal entity.
    pub client_type: ClientType,
    /// CNPJ or CPF tax document.
    pub cnpj_or_cpf: String,
    /// Contact person name.
    pub contact_name: String,
    /// Contact person email.
    pub contact_email: String,
    /// Contact person phone.
    pub contact_phone: String,
    /// Postal code.
    pub postal_code: String,
    /// Neighborhood.
    pub neighborhood: String,
    /// Country.
    pub country: String,
    /// State.
    pub state: String,
    /// City.
    pub city: String,
    /// Street.
    pub street: String,
    /// Street number.
    pub number: String,
    /// Address complement.
    pub complement: Option<String>,
    /// Geocoded latitude.
    pub latitude: Option<f64>,
    /// Geocoded longitude.
    pub longitude: Option<f64>,
    /// Timestamp when the client was created.
    pub created_at: Timestamp,
    /// Timestamp when the client was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new client.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewClient {
    pub client_name: String,
    pub client_type: ClientType,
    pub cnpj_or_cpf: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
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

/// Sparse changeset for a client; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateClient {
    pub client_name: Option<String>,
    pub client_type: Option<ClientType>,
    pub cnpj_or_cpf: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub postal_code: Option<String>,
    pub neighborhood: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub updated_at: Option<Timestamp>,
}

impl UpdateClient {
    /// Applies the changeset to an in-memory client.
    ///
    /// Mirrors what the `UPDATE` statement does, for callers that keep
    /// clients outside the database.
    pub fn apply_to(self, client: &mut Client) {
        macro_rules! apply {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(value) = self.$field {
                    client.$field = value;
                })+
            };
        }

        apply!(
            client_name,
            client_type,
            cnpj_or_cpf,
            contact_name,
            contact_email,
            contact_phone,
            postal_code,
            neighborhood,
            country,
            state,
            city,
            street,
            number,
            updated_at,
        );

        if let Some(complement) = self.complement {
            client.complement = Some(complement);
        }
        if let Some(latitude) = self.latitude {
            client.latitude = Some(latitude);
        }
        if let Some(longitude) = self.longitude {
            client.longitude = Some(longitude);
        }
    }
}
