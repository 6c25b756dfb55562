//! Identity of an authenticated caller.

use uuid::Uuid;

use super::Claims;

/// The caller a request was authenticated as.
///
/// Produced by the authentication middleware and passed explicitly into
/// every workflow call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Identifier of the authenticated user.
    pub user_id: Uuid,
    /// Email the token was issued for.
    pub email: String,
}

impl CallerIdentity {
    /// Creates a caller identity.
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }

    /// Builds the identity from verified claims.
    ///
    /// Returns `None` when the subject is not a UUID.
    pub fn from_claims(claims: Claims) -> Option<Self> {
        let user_id = claims.user_id.parse().ok()?;
        Some(Self {
            user_id,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(user_id: &str) -> Claims {
        Claims {
            user_id: user_id.to_owned(),
            email: "ana@example.com".to_owned(),
            iat: 0,
            nbf: 0,
            exp: 86_400,
        }
    }

    #[test]
    fn parses_uuid_subject() {
        let id = Uuid::new_v4();
        let caller = CallerIdentity::from_claims(claims(&id.to_string()));
        assert_eq!(caller, Some(CallerIdentity::new(id, "ana@example.com")));
    }

    #[test]
    fn rejects_non_uuid_subject() {
        assert_eq!(CallerIdentity::from_claims(claims("user-42")), None);
    }
}
