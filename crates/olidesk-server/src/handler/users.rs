//! User account handlers: login, registration and the caller's profile.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use olidesk_postgres::{PgClient, PgConnection};

use crate::extract::{AuthState, Json, PgPool, ValidateJson};
use crate::handler::Result;
use crate::handler::request::{CreateUser, Login, UpdateUser};
use crate::handler::response::{Created, ErrorResponse, Message, Session, UserDetails};
use crate::service::ServiceState;
use crate::service::security::{PasswordHasher, TokenService};
use crate::service::workflow::users;

/// Tracing target for user operations.
const TRACING_TARGET: &str = "olidesk_server::handler::users";

/// Exchanges credentials for a session token.
#[tracing::instrument(skip_all)]
async fn login(
    State(password_hasher): State<PasswordHasher>,
    State(token_service): State<TokenService>,
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<Login>,
) -> Result<(StatusCode, Json<Session>)> {
    tracing::debug!(target: TRACING_TARGET, "Login requested");

    let PgPool(mut conn) = PgPool::acquire(&pg_client).await?;
    let conn: &mut PgConnection = &mut conn;
    let token = users::login(conn, &password_hasher, &token_service, request).await?;

    Ok((StatusCode::OK, Json(token.into())))
}

fn login_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Log in")
        .description(
            "Returns a bearer token valid for 24 hours. An unknown email and a wrong \
             password produce the same response.",
        )
        .response::<200, Json<Session>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Registers a new user and its member row.
#[tracing::instrument(skip_all, fields(caller_id = %auth_state.user_id))]
async fn create_user(
    State(password_hasher): State<PasswordHasher>,
    AuthState(auth_state): AuthState,
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<CreateUser>,
) -> Result<(StatusCode, Json<Created>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating user");

    let PgPool(mut conn) = PgPool::acquire(&pg_client).await?;
    let conn: &mut PgConnection = &mut conn;
    let user = users::create_user(conn, &password_hasher, &auth_state, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(Created::new(user.id, "user created successfully")),
    ))
}

fn create_user_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create user")
        .description("Registers a user with a role. Emails are unique, case-insensitively.")
        .response::<201, Json<Created>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<409, Json<ErrorResponse>>()
}

/// Returns the caller's own account.
#[tracing::instrument(skip_all, fields(caller_id = %auth_state.user_id))]
async fn user_details(
    AuthState(auth_state): AuthState,
    PgPool(mut conn): PgPool,
) -> Result<(StatusCode, Json<UserDetails>)> {
    let conn: &mut PgConnection = &mut conn;
    let (user, member) = users::user_details(conn, &auth_state).await?;

    Ok((StatusCode::OK, Json(UserDetails::from_model(user, member))))
}

fn user_details_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get own account")
        .description("Returns the authenticated user with its role.")
        .response::<200, Json<UserDetails>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Updates the caller's name.
#[tracing::instrument(skip_all, fields(caller_id = %auth_state.user_id))]
async fn update_user(
    AuthState(auth_state): AuthState,
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<UpdateUser>,
) -> Result<(StatusCode, Json<Message>)> {
    let PgPool(mut conn) = PgPool::acquire(&pg_client).await?;
    let conn: &mut PgConnection = &mut conn;
    users::update_user(conn, &auth_state, request).await?;

    Ok((StatusCode::OK, Json(Message::new("user updated successfully"))))
}

fn update_user_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update own account")
        .description("Changes the name. Empty values and the email are ignored.")
        .response::<200, Json<Message>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Deletes the caller's account.
#[tracing::instrument(skip_all, fields(caller_id = %auth_state.user_id))]
async fn delete_user(
    AuthState(auth_state): AuthState,
    PgPool(mut conn): PgPool,
) -> Result<(StatusCode, Json<Message>)> {
    let conn: &mut PgConnection = &mut conn;
    users::delete_user(conn, &auth_state).await?;

    Ok((StatusCode::OK, Json(Message::new("user deleted successfully"))))
}

fn delete_user_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete own account")
        .description("Removes the account with its member row and ticket assignments.")
        .response::<200, Json<Message>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all user routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/users/login", post_with(login, login_docs))
        .api_route("/users/create", post_with(create_user, create_user_docs))
        .api_route("/users/details", get_with(user_details, user_details_docs))
        .api_route("/users/update", put_with(update_user, update_user_docs))
        .api_route("/users/delete", delete_with(delete_user, delete_user_docs))
        .with_path_items(|item| item.tag("Users"))
}
