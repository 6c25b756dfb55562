//! Service ticket ("form") handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use olidesk_postgres::{PgClient, PgConnection};

use crate::extract::{AuthState, Json, Path, PgPool, ValidateJson};
use crate::handler::Result;
use crate::handler::request::{CreateForm, FormPathParams, UpdateForm};
use crate::handler::response::{Created, ErrorResponse, Form, Forms, Message};
use crate::service::ServiceState;
use crate::service::workflow::forms;

/// Tracing target for form operations.
const TRACING_TARGET: &str = "olidesk_server::handler::forms";

/// Opens a ticket for a client with its technicians.
#[tracing::instrument(skip_all, fields(caller_id = %auth_state.user_id))]
async fn create_form(
    AuthState(auth_state): AuthState,
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<CreateForm>,
) -> Result<(StatusCode, Json<Created>)> {
    tracing::debug!(
        target: TRACING_TARGET,
        client_id = %request.client_id,
        technicians = request.technician_ids.len(),
        "Creating form"
    );

    let PgPool(mut conn) = PgPool::acquire(&pg_client).await?;
    let conn: &mut PgConnection = &mut conn;
    let form = forms::create_form(conn, &auth_state, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(Created::new(form.id, "form created successfully")),
    ))
}

fn create_form_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create form")
        .description(
            "Stores the ticket and its technician assignments in one transaction. \
             Duplicate technician ids are collapsed.",
        )
        .response::<201, Json<Created>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Lists tickets with client names and technicians.
#[tracing::instrument(skip_all, fields(caller_id = %auth_state.user_id))]
async fn list_forms(
    AuthState(auth_state): AuthState,
    PgPool(mut conn): PgPool,
) -> Result<(StatusCode, Json<Forms>)> {
    let conn: &mut PgConnection = &mut conn;
    let forms = forms::list_forms(conn).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        count = forms.len(),
        "Forms listed"
    );

    Ok((StatusCode::OK, Json(Forms::from_models(forms))))
}

fn list_forms_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List forms")
        .response::<200, Json<Forms>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a single ticket.
#[tracing::instrument(
    skip_all,
    fields(
        caller_id = %auth_state.user_id,
        form_id = %path_params.form_id,
    )
)]
async fn read_form(
    AuthState(auth_state): AuthState,
    Path(path_params): Path<FormPathParams>,
    PgPool(mut conn): PgPool,
) -> Result<(StatusCode, Json<Form>)> {
    let conn: &mut PgConnection = &mut conn;
    let form = forms::get_form(conn, path_params.form_id).await?;

    Ok((StatusCode::OK, Json(form.into())))
}

fn read_form_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get form")
        .description("Returns the ticket with its client and technicians ordered by name.")
        .response::<200, Json<Form>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Applies a sparse update to a ticket.
#[tracing::instrument(
    skip_all,
    fields(
        caller_id = %auth_state.user_id,
        form_id = %path_params.form_id,
    )
)]
async fn update_form(
    AuthState(auth_state): AuthState,
    Path(path_params): Path<FormPathParams>,
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<UpdateForm>,
) -> Result<(StatusCode, Json<Message>)> {
    let PgPool(mut conn) = PgPool::acquire(&pg_client).await?;
    let conn: &mut PgConnection = &mut conn;
    forms::update_form(conn, &auth_state, path_params.form_id, request).await?;

    Ok((StatusCode::OK, Json(Message::new("form updated successfully"))))
}

fn update_form_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update form")
        .description(
            "Only present, non-empty fields change. A non-empty technician list replaces \
             the current assignments.",
        )
        .response::<200, Json<Message>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Deletes a ticket and its assignments.
#[tracing::instrument(
    skip_all,
    fields(
        caller_id = %auth_state.user_id,
        form_id = %path_params.form_id,
    )
)]
async fn delete_form(
    AuthState(auth_state): AuthState,
    Path(path_params): Path<FormPathParams>,
    PgPool(mut conn): PgPool,
) -> Result<(StatusCode, Json<Message>)> {
    let conn: &mut PgConnection = &mut conn;
    forms::delete_form(conn, &auth_state, path_params.form_id).await?;

    Ok((StatusCode::OK, Json(Message::new("form deleted successfully"))))
}

fn delete_form_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete form")
        .description("Deleting a missing form succeeds.")
        .response::<200, Json<Message>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all form routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/forms/create", post_with(create_form, create_form_docs))
        .api_route("/forms/list", get_with(list_forms, list_forms_docs))
        .api_route("/forms/{formId}", get_with(read_form, read_form_docs))
        .api_route("/forms/update/{formId}", put_with(update_form, update_form_docs))
        .api_route("/forms/delete/{formId}", delete_with(delete_form, delete_form_docs))
        .with_path_items(|item| item.tag("Forms"))
}
