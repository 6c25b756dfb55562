//! Authentication gate for the `/api/v1` router.

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{OriginalUri, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::handler::{Error, ErrorKind};
use crate::service::ServiceState;
use crate::service::security::{CallerIdentity, TokenService};

/// Tracing target for the authentication gate.
pub const TRACING_TARGET_AUTH: &str = "olidesk_server::middleware::auth";

/// Path exempt from authentication by default.
pub const LOGIN_PATH: &str = "/api/v1/users/login";

/// Scheme prefix every `Authorization` header must start with.
const BEARER_PREFIX: &str = "Bearer ";

/// Routes that pass the gate without a token, matched by exact path.
#[derive(Debug, Clone)]
pub struct PublicRoutes {
    paths: Arc<HashSet<String>>,
}

impl PublicRoutes {
    /// Creates a set from full request paths.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            paths: Arc::new(paths.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns whether `path` is exempt from authentication.
    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }
}

impl Default for PublicRoutes {
    fn default() -> Self {
        Self::new([LOGIN_PATH])
    }
}

/// State of the [`require_authentication`] middleware.
#[derive(Debug, Clone)]
pub struct AuthGate {
    tokens: TokenService,
    public_routes: PublicRoutes,
}

impl AuthGate {
    /// Creates a gate with an explicit set of public routes.
    pub fn new(tokens: TokenService, public_routes: PublicRoutes) -> Self {
        Self {
            tokens,
            public_routes,
        }
    }

    /// Creates a gate where only login is public.
    pub fn from_state(state: &ServiceState) -> Self {
        Self::new(state.token_service.clone(), PublicRoutes::default())
    }

    /// Resolves the caller from an `Authorization` header value.
    fn authenticate(&self, authorization: Option<&str>) -> Result<CallerIdentity, Error<'static>> {
        let Some(authorization) = authorization else {
            return Err(ErrorKind::MissingAuthToken
                .with_message("token not provided")
                .with_resource("authentication"));
        };

        let Some(token) = authorization.strip_prefix(BEARER_PREFIX) else {
            return Err(ErrorKind::MalformedAuthToken
                .with_message("Use: Bearer <token>")
                .with_resource("authentication"));
        };

        let claims = self.tokens.verify(token)?;

        CallerIdentity::from_claims(claims).ok_or_else(|| {
            ErrorKind::MalformedAuthToken
                .with_message("invalid token: malformed subject")
                .with_resource("authentication")
        })
    }
}

/// Verifies the bearer token of every non-public request.
///
/// On success the resolved [`CallerIdentity`] is inserted into the request
/// extensions, where [`AuthState`] reads it.
///
/// ```rust,ignore
/// use axum::middleware::from_fn_with_state;
/// use olidesk_server::middleware::{AuthGate, require_authentication};
///
/// let router = router.layer(from_fn_with_state(AuthGate::from_state(&state), require_authentication));
/// ```
///
/// [`AuthState`]: crate::extract::AuthState
pub async fn require_authentication(
    State(gate): State<AuthGate>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map_or_else(|| request.uri().path(), |uri| uri.path())
        .to_owned();

    if gate.public_routes.contains(&path) {
        return next.run(request).await;
    }

    // A header that is not visible ASCII is treated like a wrong scheme.
    let authorization = match request.headers().get(header::AUTHORIZATION) {
        None => None,
        Some(value) => Some(value.to_str().unwrap_or_default()),
    };

    match gate.authenticate(authorization) {
        Ok(identity) => {
            tracing::debug!(
                target: TRACING_TARGET_AUTH,
                user_id = %identity.user_id,
                path = %path,
                "Request authenticated"
            );

            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_AUTH,
                path = %path,
                reason = error.message().unwrap_or_default(),
                "Request rejected by authentication gate"
            );

            error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Span, Timestamp};
    use uuid::Uuid;

    use super::*;
    use crate::service::security::{SessionKeys, SessionKeysConfig};

    fn gate() -> anyhow::Result<AuthGate> {
        let keys = SessionKeys::from_config(&SessionKeysConfig::new("gate-test-secret-value"))?;
        Ok(AuthGate::new(TokenService::new(keys), PublicRoutes::default()))
    }

    fn rejection(result: Result<CallerIdentity, Error<'static>>) -> (ErrorKind, String) {
        match result {
            Ok(_) => (ErrorKind::default(), String::new()),
            Err(error) => (error.kind(), error.message().unwrap_or_default().to_owned()),
        }
    }

    #[test]
    fn public_routes_match_exact_paths() {
        let routes = PublicRoutes::default();
        assert!(routes.contains("/api/v1/users/login"));
        assert!(!routes.contains("/api/v1/users/login/"));
        assert!(!routes.contains("/api/v1/users/create"));
    }

    #[test]
    fn missing_and_malformed_headers() -> anyhow::Result<()> {
        let gate = gate()?;

        assert_eq!(
            rejection(gate.authenticate(None)),
            (ErrorKind::MissingAuthToken, "token not provided".to_owned())
        );

        for header in ["Token abc", "bearer abc", "Bearerabc", ""] {
            assert_eq!(
                rejection(gate.authenticate(Some(header))),
                (ErrorKind::MalformedAuthToken, "Use: Bearer <token>".to_owned())
            );
        }
        Ok(())
    }

    #[test]
    fn unverifiable_tokens_are_rejected() -> anyhow::Result<()> {
        let gate = gate()?;

        let (kind, message) = rejection(gate.authenticate(Some("Bearer not-a-jwt")));
        assert_eq!(kind, ErrorKind::MalformedAuthToken);
        assert_eq!(message, "invalid token: token is malformed");

        let yesterday = Timestamp::now() - Span::new().hours(25);
        let expired = gate.tokens.issue_at(Uuid::new_v4(), "ana@olidesk.com", yesterday)?;
        let header = format!("Bearer {}", expired.access_token);
        let (kind, message) = rejection(gate.authenticate(Some(&header)));
        assert_eq!(kind, ErrorKind::Unauthorized);
        assert_eq!(message, "invalid token: token is expired");
        Ok(())
    }

    #[test]
    fn valid_token_resolves_identity() -> anyhow::Result<()> {
        let gate = gate()?;
        let user_id = Uuid::new_v4();
        let token = gate.tokens.issue(user_id, "ana@olidesk.com")?;

        let identity = gate.authenticate(Some(&format!("Bearer {}", token.access_token)))?;
        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.email, "ana@olidesk.com");
        Ok(())
    }
}
