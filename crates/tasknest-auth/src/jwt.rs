//! JWT (JSON Web Token) utilities for session cookies.
//!
//! Tokens are HS256-signed with the shared secret from [`JwtConfig`]. Verification
//! rejects tokens that are malformed, signed with another key or algorithm, issued by
//! someone else, expired (no leeway), or that claim a lifetime longer than
//! [`MAX_SESSION_EXPIRY`].
//!
//! # Example
//!
//! ```ignore
//! use tasknest_auth::{create_session_token, verify_session_token};
//!
//! let token = create_session_token(user.id, &user.username, "UTC", &jwt_config)?;
//! let claims = verify_session_token(&token, &jwt_config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use tasknest_config::JwtConfig;
use tasknest_config::jwt::MAX_SESSION_EXPIRY;

use crate::claims::SessionClaims;

/// Why a session token was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("invalid token signature or issuer")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token lifetime exceeds {MAX_SESSION_EXPIRY} seconds")]
    InvalidLifetime,

    #[error("failed to sign token: {0}")]
    Encode(String),
}

/// Issues a session token for the given user, valid for `jwt_config.session_expiry`
/// seconds (never more than one hour).
pub fn create_session_token(
    id: i64,
    username: &str,
    tzone: &str,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let now = Utc::now().timestamp();
    let lifetime = jwt_config.session_expiry.clamp(1, MAX_SESSION_EXPIRY);

    let claims = SessionClaims {
        id,
        username: username.to_string(),
        tzone: tzone.to_string(),
        iss: jwt_config.issuer.clone(),
        iat: now,
        exp: now + lifetime,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encode(e.to_string()))
}

/// Verifies a session token and returns its claims.
///
/// # Errors
///
/// - [`TokenError::Expired`] once `exp` has passed
/// - [`TokenError::InvalidSignature`] for a foreign key, algorithm or issuer
/// - [`TokenError::InvalidLifetime`] when `exp - iat` exceeds one hour
/// - [`TokenError::Malformed`] for anything that does not decode into [`SessionClaims`]
pub fn verify_session_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<SessionClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[jwt_config.issuer.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss"]);

    let claims = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::InvalidIssuer => {
            TokenError::InvalidSignature
        }
        _ => TokenError::Malformed,
    })?;

    if claims.exp - claims.iat > MAX_SESSION_EXPIRY {
        return Err(TokenError::InvalidLifetime);
    }

    Ok(claims)
}
