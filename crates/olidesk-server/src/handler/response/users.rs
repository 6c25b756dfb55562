//! User response types.

use jiff::Timestamp;
use olidesk_postgres::model::{Member, User};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::security::IssuedToken;

/// A signed session token returned by login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// The HS256 token to send as `Authorization: Bearer <token>`.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

impl From<IssuedToken> for Session {
    fn from(token: IssuedToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: "Bearer".to_owned(),
            expires_in: token.expires_in,
        }
    }
}

/// The caller's own user record. Never carries the password digest.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserDetails {
    /// Builds the response from the user and its member row.
    pub fn from_model(user: User, member: Option<Member>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: member.map(|m| m.role).unwrap_or_default(),
            created_at: user.created_at.into(),
            updated_at: user.updated_at.into(),
        }
    }
}
