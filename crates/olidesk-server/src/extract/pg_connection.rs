//! PostgreSQL connection extractor for request handlers.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut};
use olidesk_postgres::{PgClient, PgConn};

use crate::handler::{Error, ErrorKind};

/// Tracing target for connection acquisition.
const TRACING_TARGET: &str = "olidesk_server::extract::pg_connection";

/// Extractor that checks a connection out of the pool for the request.
///
/// The connection dereferences to [`PgConnection`], which implements every
/// repository trait.
///
/// ```rust,ignore
/// use olidesk_server::extract::PgPool;
///
/// async fn list_clients(PgPool(mut conn): PgPool) {
///     let conn: &mut PgConnection = &mut conn;
/// }
/// ```
///
/// Handlers with a request body take `State<PgClient>` and call
/// [`PgPool::acquire`] after the body has been validated.
///
/// [`PgConnection`]: olidesk_postgres::PgConnection
#[derive(Debug, Deref, DerefMut)]
pub struct PgPool(pub PgConn);

impl PgPool {
    /// Checks a connection out of `pg_client`.
    ///
    /// Fails with `503 Service Unavailable` when the pool cannot hand one out.
    pub async fn acquire(pg_client: &PgClient) -> Result<Self, Error<'static>> {
        let conn = pg_client.get_connection().await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "Failed to acquire database connection"
            );
            ErrorKind::ServiceUnavailable
                .with_message("database unavailable")
                .with_context(e.to_string())
        })?;

        Ok(PgPool(conn))
    }
}

impl<S> FromRequestParts<S> for PgPool
where
    PgClient: FromRef<S>,
    S: Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Self::acquire(&PgClient::from_ref(state)).await
    }
}

impl aide::OperationInput for PgPool {}
