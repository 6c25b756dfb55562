//! User request types.
//!
//! Missing string fields decode as empty so that the domain rules, not the
//! JSON decoder, decide which message the caller sees.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload for login.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Login {
    /// Email address of the user.
    #[validate(length(max = 254))]
    pub email: String,

    /// Plaintext password.
    #[validate(length(max = 1000))]
    pub password: String,
}

/// Request payload to create a user and its member row.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUser {
    /// Display name.
    #[validate(length(max = 100))]
    pub name: String,

    /// Email address; stored lowercased.
    #[validate(length(max = 254))]
    pub email: String,

    /// Plaintext password, hashed before storage.
    #[validate(length(max = 256))]
    pub password: String,

    /// Free-form role label of the member row.
    #[validate(length(max = 64))]
    pub role: String,
}

/// Request payload to update the caller's profile.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUser {
    /// New display name. Absent or empty leaves it unchanged.
    #[validate(length(max = 100))]
    pub name: Option<String>,

    /// Accepted for compatibility and ignored: emails are immutable.
    pub email: Option<String>,
}
