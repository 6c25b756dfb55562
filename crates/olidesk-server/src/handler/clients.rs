//! Client record handlers.
//!
//! Creating a client geocodes its address; updating re-geocodes it when the
//! patch carries a complete address. A failed lookup aborts the write.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use olidesk_geocode::GeocodeService;
use olidesk_postgres::{PgClient, PgConnection};

use crate::extract::{AuthState, Json, Path, PgPool, ValidateJson};
use crate::handler::Result;
use crate::handler::request::{ClientPathParams, CreateClient, UpdateClient};
use crate::handler::response::{Client, Clients, Created, ErrorResponse, Message};
use crate::service::ServiceState;
use crate::service::workflow::clients;

/// Tracing target for client operations.
const TRACING_TARGET: &str = "olidesk_server::handler::clients";

/// Creates a client and stores its coordinates.
#[tracing::instrument(skip_all, fields(caller_id = %auth_state.user_id))]
async fn create_client(
    State(geocode): State<GeocodeService>,
    AuthState(auth_state): AuthState,
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<CreateClient>,
) -> Result<(StatusCode, Json<Created>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating client");

    let PgPool(mut conn) = PgPool::acquire(&pg_client).await?;
    let conn: &mut PgConnection = &mut conn;
    let client = clients::create_client(conn, &geocode, &auth_state, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(Created::new(client.id, "client created successfully")),
    ))
}

fn create_client_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create client")
        .description(
            "Validates the record, resolves the address to coordinates and stores both. \
             Nothing is stored when the address cannot be located.",
        )
        .response::<201, Json<Created>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<502, Json<ErrorResponse>>()
}

/// Lists clients, newest first.
#[tracing::instrument(skip_all, fields(caller_id = %auth_state.user_id))]
async fn list_clients(
    AuthState(auth_state): AuthState,
    PgPool(mut conn): PgPool,
) -> Result<(StatusCode, Json<Clients>)> {
    let conn: &mut PgConnection = &mut conn;
    let clients = clients::list_clients(conn).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        count = clients.len(),
        "Clients listed"
    );

    Ok((StatusCode::OK, Json(Clients::from_models(clients))))
}

fn list_clients_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List clients")
        .description("Returns every client ordered by creation time, newest first.")
        .response::<200, Json<Clients>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a single client.
#[tracing::instrument(
    skip_all,
    fields(
        caller_id = %auth_state.user_id,
        client_id = %path_params.client_id,
    )
)]
async fn read_client(
    AuthState(auth_state): AuthState,
    Path(path_params): Path<ClientPathParams>,
    PgPool(mut conn): PgPool,
) -> Result<(StatusCode, Json<Client>)> {
    let conn: &mut PgConnection = &mut conn;
    let client = clients::get_client(conn, path_params.client_id).await?;

    Ok((StatusCode::OK, Json(client.into())))
}

fn read_client_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get client")
        .response::<200, Json<Client>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Applies a sparse update to a client.
#[tracing::instrument(
    skip_all,
    fields(
        caller_id = %auth_state.user_id,
        client_id = %path_params.client_id,
    )
)]
async fn update_client(
    State(geocode): State<GeocodeService>,
    AuthState(auth_state): AuthState,
    Path(path_params): Path<ClientPathParams>,
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<UpdateClient>,
) -> Result<(StatusCode, Json<Message>)> {
    let PgPool(mut conn) = PgPool::acquire(&pg_client).await?;
    let conn: &mut PgConnection = &mut conn;
    clients::update_client(conn, &geocode, &auth_state, path_params.client_id, request).await?;

    Ok((StatusCode::OK, Json(Message::new("client updated successfully"))))
}

fn update_client_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update client")
        .description(
            "Only present, non-empty fields change. The address is geocoded again when \
             street, number, neighborhood, city, state, postal code and country are all given.",
        )
        .response::<200, Json<Message>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
        .response::<502, Json<ErrorResponse>>()
}

/// Deletes a client.
#[tracing::instrument(
    skip_all,
    fields(
        caller_id = %auth_state.user_id,
        client_id = %path_params.client_id,
    )
)]
async fn delete_client(
    AuthState(auth_state): AuthState,
    Path(path_params): Path<ClientPathParams>,
    PgPool(mut conn): PgPool,
) -> Result<(StatusCode, Json<Message>)> {
    let conn: &mut PgConnection = &mut conn;
    clients::delete_client(conn, &auth_state, path_params.client_id).await?;

    Ok((StatusCode::OK, Json(Message::new("client deleted successfully"))))
}

fn delete_client_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete client")
        .description("Deleting a missing client succeeds. A client with tickets cannot be deleted.")
        .response::<200, Json<Message>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<409, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all client routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/clients/create", post_with(create_client, create_client_docs))
        .api_route("/clients/list", get_with(list_clients, list_clients_docs))
        .api_route("/clients/{clientId}", get_with(read_client, read_client_docs))
        .api_route(
            "/clients/update/{clientId}",
            put_with(update_client, update_client_docs),
        )
        .api_route(
            "/clients/delete/{clientId}",
            delete_with(delete_client, delete_client_docs),
        )
        .with_path_items(|item| item.tag("Clients"))
}
