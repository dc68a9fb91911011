//! JWT claim structure for session tokens.

use serde::{Deserialize, Serialize};

/// Claims embedded in the session token.
///
/// Unknown fields are rejected so that a token whose shape does not match exactly
/// is treated as invalid.
///
/// # Fields
///
/// - `id`: user ID
/// - `username`: display name
/// - `tzone`: IANA timezone name supplied by the client at login
/// - `iss`: issuer
/// - `iat`: issued-at timestamp (Unix seconds)
/// - `exp`: expiration timestamp (Unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionClaims {
    pub id: i64,
    pub username: String,
    pub tzone: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}
