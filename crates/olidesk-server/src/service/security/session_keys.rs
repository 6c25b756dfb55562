//! Signing keys for JWT session tokens.

use std::fmt;
use std::sync::Arc;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Tracing target for session key management.
const TRACING_TARGET: &str = "olidesk_server::service::session_keys";

/// Shortest accepted signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 16;

/// Signing secret configuration.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
pub struct SessionKeysConfig {
    /// Symmetric secret used to sign and verify session tokens (HS256).
    #[cfg_attr(
        any(test, feature = "config"),
        arg(long = "jwt-secret", env = "JWT_SECRET", hide_env_values = true)
    )]
    pub jwt_secret: String,
}

impl SessionKeysConfig {
    /// Creates a configuration from a secret.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Validates the secret.
    ///
    /// A missing or short secret is a fatal configuration error.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(Error::config("JWT_SECRET must be set"));
        }

        if self.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(Error::config(format!(
                "JWT_SECRET must be at least {MIN_SECRET_LEN} bytes long"
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for SessionKeysConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeysConfig")
            .field("jwt_secret", &"***")
            .finish()
    }
}

/// Encoding and decoding keys derived from the signing secret.
///
/// Cheap to clone; all clones share the same keys.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
}

impl SessionKeys {
    /// Validates the configuration and derives both keys from the secret.
    pub fn from_config(config: &SessionKeysConfig) -> Result<Self> {
        config.validate()?;

        let secret = config.jwt_secret.as_bytes();
        let inner = SessionKeysInner {
            decoding_key: DecodingKey::from_secret(secret),
            encoding_key: EncodingKey::from_secret(secret),
        };

        tracing::info!(
            target: TRACING_TARGET,
            secret_len = secret.len(),
            "Session signing keys loaded",
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns the key used to verify tokens.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Returns the key used to sign tokens.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn rejects_missing_or_short_secret() {
        let error = SessionKeys::from_config(&SessionKeysConfig::new("")).err();
        assert_eq!(error.map(|e| e.kind()), Some(ErrorKind::Config));

        let error = SessionKeys::from_config(&SessionKeysConfig::new("too-short")).err();
        assert_eq!(error.map(|e| e.kind()), Some(ErrorKind::Config));
    }

    #[test]
    fn accepts_long_enough_secret() {
        let config = SessionKeysConfig::new("0123456789abcdef");
        assert!(SessionKeys::from_config(&config).is_ok());
    }

    #[test]
    fn debug_hides_secret() {
        let config = SessionKeysConfig::new("super-secret-signing-key");
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
