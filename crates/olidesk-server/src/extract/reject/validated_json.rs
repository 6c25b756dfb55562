//! JSON extractor that also runs `validator` rules.

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::Json;
use crate::handler::response::ErrorResponse;

/// Tracing target for request validation.
const TRACING_TARGET: &str = "olidesk_server::extract::validated_json";

/// [`Json`] followed by [`Validate::validate`].
///
/// These are shape checks only (lengths of free-text fields). The ordered
/// domain rules run inside the workflows. A failure renders as `400` with a
/// `validation` list naming every offending field.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = ErrorResponse<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state)
            .await
            .map_err(ErrorResponse::from)?;

        if let Err(errors) = data.validate() {
            tracing::debug!(
                target: TRACING_TARGET,
                errors = ?errors.field_errors().keys().collect::<Vec<_>>(),
                "Request validation failed"
            );
            return Err(ErrorResponse::from(errors));
        }

        Ok(Self(data))
    }
}

impl<T> aide::OperationInput for ValidateJson<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Json::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        Json::<T>::inferred_early_responses(ctx, operation)
    }
}
