//! Caller identity extractor.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;

use crate::handler::{Error, ErrorKind};
use crate::service::security::CallerIdentity;

/// The authenticated caller of the current request.
///
/// The authentication gate verifies the bearer token and inserts a
/// [`CallerIdentity`] into the request extensions; this extractor reads it
/// back. A route outside the gate has no identity and is rejected with `401`.
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct AuthState(pub CallerIdentity);

impl AuthState {
    /// Returns the identity, to be passed into workflow calls.
    #[inline]
    pub fn into_identity(self) -> CallerIdentity {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .map(Self)
            .ok_or_else(|| {
                ErrorKind::Unauthorized
                    .with_message("not authenticated")
                    .with_resource("authentication")
            })
    }
}

impl<S> OptionalFromRequestParts<S> for AuthState
where
    S: Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<CallerIdentity>().cloned().map(Self))
    }
}

impl aide::OperationInput for AuthState {}
