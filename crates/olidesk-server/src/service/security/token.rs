//! Issuing and verifying session tokens.

use jiff::Timestamp;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SessionKeys;
use crate::handler::{ErrorKind, Result};

/// Tracing target for token issuing and verification.
const TRACING_TARGET: &str = "olidesk_server::service::token";

/// Lifetime of every issued token, in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id as a string.
    #[serde(default)]
    pub user_id: String,
    /// Email of the user at issuing time.
    #[serde(default)]
    pub email: String,
    /// Issued at, seconds since the epoch.
    pub iat: i64,
    /// Not valid before, seconds since the epoch.
    pub nbf: i64,
    /// Expires at, seconds since the epoch.
    pub exp: i64,
}

/// A freshly issued token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The signed token.
    pub access_token: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

/// Reasons a token fails verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Wrong secret or an algorithm other than HS256.
    #[error("signature is invalid")]
    InvalidSignature,
    /// `exp` is not in the future.
    #[error("token is expired")]
    Expired,
    /// `nbf` is still in the future.
    #[error("token is not valid yet")]
    NotYetValid,
    /// The token cannot be parsed.
    #[error("token is malformed")]
    Malformed,
    /// `user_id` is absent or empty.
    #[error("token has no subject")]
    MissingSubject,
}

/// HS256 token service over the shared [`SessionKeys`].
#[derive(Debug, Clone)]
pub struct TokenService {
    keys: SessionKeys,
}

impl TokenService {
    /// Creates a token service from loaded keys.
    pub fn new(keys: SessionKeys) -> Self {
        Self { keys }
    }

    /// Issues a token for a user, valid for 24 hours from now.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<IssuedToken> {
        self.issue_at(user_id, email, Timestamp::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, user_id: Uuid, email: &str, now: Timestamp) -> Result<IssuedToken> {
        let issued_at = now.as_second();
        let claims = Claims {
            user_id: user_id.to_string(),
            email: email.to_owned(),
            iat: issued_at,
            nbf: issued_at,
            exp: issued_at + TOKEN_LIFETIME_SECS,
        };

        let header = Header::new(Algorithm::HS256);
        let access_token = jsonwebtoken::encode(&header, &claims, self.keys.encoding_key())
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "failed to sign session token"
                );

                ErrorKind::InternalServerError
                    .with_context("Token signing error")
                    .with_resource("authentication")
            })?;

        tracing::debug!(
            target: TRACING_TARGET,
            user_id = %user_id,
            expires_at = claims.exp,
            "Session token issued"
        );

        Ok(IssuedToken {
            access_token,
            expires_in: TOKEN_LIFETIME_SECS,
        })
    }

    /// Verifies a token against the wall clock.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Timestamp::now())
    }

    /// Verifies a token as if the current time were `now`.
    ///
    /// Checks run in order: signature, structure, time window, subject.
    pub fn verify_at(&self, token: &str, now: Timestamp) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        let token_data =
            jsonwebtoken::decode::<Claims>(token, self.keys.decoding_key(), &validation)
                .map_err(|e| match e.kind() {
                    JwtErrorKind::InvalidSignature
                    | JwtErrorKind::InvalidAlgorithm
                    | JwtErrorKind::InvalidAlgorithmName => TokenError::InvalidSignature,
                    _ => TokenError::Malformed,
                })?;

        let claims = token_data.claims;
        let now = now.as_second();

        if claims.nbf > now {
            return Err(TokenError::NotYetValid);
        }

        if claims.exp <= now {
            return Err(TokenError::Expired);
        }

        if claims.user_id.trim().is_empty() {
            return Err(TokenError::MissingSubject);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;
    use crate::service::security::SessionKeysConfig;

    fn service(secret: &str) -> anyhow::Result<TokenService> {
        let keys = SessionKeys::from_config(&SessionKeysConfig::new(secret))?;
        Ok(TokenService::new(keys))
    }

    fn sign(claims: &serde_json::Value, secret: &str, algorithm: Algorithm) -> String {
        let key = jsonwebtoken::EncodingKey::from_secret(secret.as_bytes());
        jsonwebtoken::encode(&Header::new(algorithm), claims, &key).unwrap_or_default()
    }

    const SECRET: &str = "test-secret-0123456789";

    #[test]
    fn token_lives_for_exactly_one_day() -> anyhow::Result<()> {
        let tokens = service(SECRET)?;
        let issued_at = Timestamp::from_second(1_700_000_000)?;
        let user_id = Uuid::new_v4();

        let issued = tokens.issue_at(user_id, "ana@example.com", issued_at)?;
        assert_eq!(issued.expires_in, 86_400);

        let almost = issued_at.checked_add(SignedDuration::from_mins(23 * 60 + 59))?;
        let claims = tokens.verify_at(&issued.access_token, almost)?;
        assert_eq!(claims.user_id, user_id.to_string());
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_SECS);

        let past = issued_at.checked_add(SignedDuration::from_mins(24 * 60 + 1))?;
        assert_eq!(
            tokens.verify_at(&issued.access_token, past),
            Err(TokenError::Expired)
        );
        Ok(())
    }

    #[test]
    fn other_secret_is_invalid_signature() -> anyhow::Result<()> {
        let issuer = service("another-secret-0123456789")?;
        let verifier = service(SECRET)?;
        let now = Timestamp::from_second(1_700_000_000)?;

        let issued = issuer.issue_at(Uuid::new_v4(), "ana@example.com", now)?;
        assert_eq!(
            verifier.verify_at(&issued.access_token, now),
            Err(TokenError::InvalidSignature)
        );
        Ok(())
    }

    #[test]
    fn other_algorithm_is_invalid_signature() -> anyhow::Result<()> {
        let tokens = service(SECRET)?;
        let claims = serde_json::json!({
            "user_id": Uuid::new_v4().to_string(),
            "email": "ana@example.com",
            "iat": 1_700_000_000,
            "nbf": 1_700_000_000,
            "exp": 1_700_086_400,
        });

        let token = sign(&claims, SECRET, Algorithm::HS512);
        let now = Timestamp::from_second(1_700_000_100)?;
        assert_eq!(
            tokens.verify_at(&token, now),
            Err(TokenError::InvalidSignature)
        );
        Ok(())
    }

    #[test]
    fn garbage_is_malformed() -> anyhow::Result<()> {
        let tokens = service(SECRET)?;
        assert_eq!(tokens.verify("garbage"), Err(TokenError::Malformed));
        assert_eq!(tokens.verify(""), Err(TokenError::Malformed));
        Ok(())
    }

    #[test]
    fn future_token_is_not_yet_valid() -> anyhow::Result<()> {
        let tokens = service(SECRET)?;
        let issued_at = Timestamp::from_second(1_700_000_000)?;
        let issued = tokens.issue_at(Uuid::new_v4(), "ana@example.com", issued_at)?;

        let before = Timestamp::from_second(1_699_999_000)?;
        assert_eq!(
            tokens.verify_at(&issued.access_token, before),
            Err(TokenError::NotYetValid)
        );
        Ok(())
    }

    #[test]
    fn missing_subject_is_rejected() -> anyhow::Result<()> {
        let tokens = service(SECRET)?;
        let claims = serde_json::json!({
            "email": "ana@example.com",
            "iat": 1_700_000_000,
            "nbf": 1_700_000_000,
            "exp": 1_700_086_400,
        });

        let token = sign(&claims, SECRET, Algorithm::HS256);
        let now = Timestamp::from_second(1_700_000_100)?;
        assert_eq!(
            tokens.verify_at(&token, now),
            Err(TokenError::MissingSubject)
        );
        Ok(())
    }
}
