//! Authentication building blocks: signing keys, session tokens, caller
//! identity and password hashing.

mod identity;
mod password_hasher;
mod session_keys;
mod token;

pub use identity::CallerIdentity;
pub use password_hasher::PasswordHasher;
pub use session_keys::{MIN_SECRET_LEN, SessionKeys, SessionKeysConfig};
pub use token::{Claims, IssuedToken, TOKEN_LIFETIME_SECS, TokenError, TokenService};
