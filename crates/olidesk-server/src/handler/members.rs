//! Member listing.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::http::StatusCode;
use olidesk_postgres::PgConnection;
use olidesk_postgres::query::MemberRepository;

use crate::extract::{AuthState, Json, PgPool};
use crate::handler::Result;
use crate::handler::response::{ErrorResponse, Members};
use crate::service::ServiceState;

/// Tracing target for member operations.
const TRACING_TARGET: &str = "olidesk_server::handler::members";

/// Lists every member, ordered by name.
#[tracing::instrument(skip_all, fields(caller_id = %auth_state.user_id))]
async fn list_members(
    AuthState(auth_state): AuthState,
    PgPool(mut conn): PgPool,
) -> Result<(StatusCode, Json<Members>)> {
    let conn: &mut PgConnection = &mut conn;
    let members = conn.list_members().await?;

    tracing::debug!(
        target: TRACING_TARGET,
        count = members.len(),
        "Members listed"
    );

    Ok((StatusCode::OK, Json(Members::from_models(members))))
}

fn list_members_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List members")
        .description("Returns every member with name, email and role. Members are the technicians tickets are assigned to.")
        .response::<200, Json<Members>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all member routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/members/list", get_with(list_members, list_members_docs))
        .with_path_items(|item| item.tag("Members"))
}
