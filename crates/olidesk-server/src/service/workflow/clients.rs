//! Client record workflow: validation, geocoding and persistence.

use jiff::Timestamp;
use olidesk_geocode::{AddressQuery, GeocodeService};
use olidesk_postgres::model::{Client, NewClient, UpdateClient as UpdateClientModel};
use olidesk_postgres::query::ClientRepository;
use uuid::Uuid;

use super::validation::{ValidationError, is_valid_email, present, require};
use crate::handler::request::{AddressPatch, ContactPatch, CreateClient, UpdateClient};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::security::CallerIdentity;

/// Tracing target for the client workflow.
const TRACING_TARGET: &str = "olidesk_server::service::clients";

/// Error returned when a client id does not resolve.
pub(crate) fn client_not_found() -> Error<'static> {
    ErrorKind::NotFound
        .with_message("client not found")
        .with_resource("client")
}

/// Checks the create payload, stopping at the first failing rule.
pub fn validate_new_client(request: &CreateClient) -> Result<(), ValidationError> {
    require(&request.client_name, ValidationError::ClientName)?;
    if request.client_type.is_none() {
        return Err(ValidationError::ClientType);
    }
    require(&request.cnpj_or_cpf, ValidationError::CnpjOrCpf)?;

    let contact = &request.contact;
    require(&contact.name, ValidationError::ContactName)?;
    if !is_valid_email(contact.email.trim()) {
        return Err(ValidationError::ContactEmail);
    }
    require(&contact.phone, ValidationError::ContactPhone)?;

    let address = &request.address;
    require(&address.postal_code, ValidationError::PostalCode)?;
    require(&address.country, ValidationError::Country)?;
    require(&address.state, ValidationError::State)?;
    require(&address.city, ValidationError::City)?;
    require(&address.street, ValidationError::Street)?;
    require(&address.number, ValidationError::Number)?;

    Ok(())
}

/// Validates, geocodes and stores a new client.
///
/// A failed lookup aborts the creation; no client is stored without
/// coordinates.
pub async fn create_client<C>(
    conn: &mut C,
    geocode: &GeocodeService,
    caller: &CallerIdentity,
    request: CreateClient,
) -> Result<Client>
where
    C: ClientRepository + Send,
{
    validate_new_client(&request)?;

    let CreateClient {
        client_name,
        client_type,
        cnpj_or_cpf,
        contact,
        address,
    } = request;

    let client_type = client_type.ok_or(ValidationError::ClientType)?;
    let query = AddressQuery {
        street: address.street.trim().to_owned(),
        number: address.number.trim().to_owned(),
        neighborhood: address.neighborhood.trim().to_owned(),
        city: address.city.trim().to_owned(),
        state: address.state.trim().to_owned(),
        postal_code: address.postal_code.trim().to_owned(),
        country: address.country.trim().to_owned(),
    };

    let coordinates = geocode.geocode(&query).await?;

    let new_client = NewClient {
        client_name: client_name.trim().to_owned(),
        client_type,
        cnpj_or_cpf: cnpj_or_cpf.trim().to_owned(),
        contact_name: contact.name.trim().to_owned(),
        contact_email: contact.email.trim().to_owned(),
        contact_phone: contact.phone.trim().to_owned(),
        postal_code: query.postal_code,
        neighborhood: query.neighborhood,
        country: query.country,
        state: query.state,
        city: query.city,
        street: query.street,
        number: query.number,
        complement: present(address.complement),
        latitude: Some(coordinates.latitude()),
        longitude: Some(coordinates.longitude()),
    };

    let client = conn.create_client(new_client).await?;

    tracing::info!(
        target: TRACING_TARGET,
        caller_id = %caller.user_id,
        client_id = %client.id,
        "Client created"
    );

    Ok(client)
}

/// Returns a client by id.
pub async fn get_client<C>(conn: &mut C, client_id: Uuid) -> Result<Client>
where
    C: ClientRepository + Send,
{
    conn.find_client_by_id(client_id)
        .await?
        .ok_or_else(client_not_found)
}

/// Returns all clients, newest first.
pub async fn list_clients<C>(conn: &mut C) -> Result<Vec<Client>>
where
    C: ClientRepository + Send,
{
    Ok(conn.list_clients().await?)
}

/// Builds the sparse changeset of an update.
///
/// Returns the changes and, when every geocoding component was supplied,
/// the address to resolve again.
pub fn client_changes(
    request: UpdateClient,
) -> Result<(UpdateClientModel, Option<AddressQuery>), ValidationError> {
    let UpdateClient {
        client_name,
        client_type,
        cnpj_or_cpf,
        contact,
        address,
    } = request;

    let ContactPatch { name, email, phone } = contact.unwrap_or_default();
    let contact_email = present(email);
    if let Some(ref email) = contact_email
        && !is_valid_email(email)
    {
        return Err(ValidationError::ContactEmail);
    }

    let AddressPatch {
        postal_code,
        neighborhood,
        country,
        state,
        city,
        street,
        number,
        complement,
    } = address.unwrap_or_default();

    let mut changes = UpdateClientModel {
        client_name: present(client_name),
        client_type,
        cnpj_or_cpf: present(cnpj_or_cpf),
        contact_name: present(name),
        contact_email,
        contact_phone: present(phone),
        postal_code: present(postal_code),
        neighborhood: present(neighborhood),
        country: present(country),
        state: present(state),
        city: present(city),
        street: present(street),
        number: present(number),
        complement: present(complement),
        ..Default::default()
    };

    let query = AddressQuery {
        street: changes.street.clone().unwrap_or_default(),
        number: changes.number.clone().unwrap_or_default(),
        neighborhood: changes.neighborhood.clone().unwrap_or_default(),
        city: changes.city.clone().unwrap_or_default(),
        state: changes.state.clone().unwrap_or_default(),
        postal_code: changes.postal_code.clone().unwrap_or_default(),
        country: changes.country.clone().unwrap_or_default(),
    };

    changes.updated_at = Some(Timestamp::now().into());
    Ok((changes, query.is_complete().then_some(query)))
}

/// Applies a sparse update to a client.
///
/// Absent and empty fields keep their stored value. Coordinates are
/// refreshed only when the full address was supplied.
pub async fn update_client<C>(
    conn: &mut C,
    geocode: &GeocodeService,
    caller: &CallerIdentity,
    client_id: Uuid,
    request: UpdateClient,
) -> Result<Client>
where
    C: ClientRepository + Send,
{
    if conn.find_client_by_id(client_id).await?.is_none() {
        return Err(client_not_found());
    }

    let (mut changes, address) = client_changes(request)?;
    let regeocoded = address.is_some();
    if let Some(query) = address {
        let coordinates = geocode.geocode(&query).await?;
        changes.latitude = Some(coordinates.latitude());
        changes.longitude = Some(coordinates.longitude());
    }

    let client = conn.update_client(client_id, changes).await?;

    tracing::info!(
        target: TRACING_TARGET,
        caller_id = %caller.user_id,
        client_id = %client.id,
        regeocoded,
        "Client updated"
    );

    Ok(client)
}

/// Deletes a client. Deleting a missing client succeeds.
pub async fn delete_client<C>(
    conn: &mut C,
    caller: &CallerIdentity,
    client_id: Uuid,
) -> Result<()>
where
    C: ClientRepository + Send,
{
    let deleted = conn.delete_client(client_id).await?;

    tracing::info!(
        target: TRACING_TARGET,
        caller_id = %caller.user_id,
        client_id = %client_id,
        deleted,
        "Client delete requested"
    );

    Ok(())
}
