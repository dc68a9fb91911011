//! # tasknest Auth
//!
//! Stateless session tokens for tasknest.
//!
//! - [`claims`]: the claim structure carried by the `jwt` cookie
//! - [`jwt`]: token issuance and verification
//!
//! Sessions are never persisted server-side: a token is valid when its HS256
//! signature verifies against the shared secret, its issuer matches, it has not
//! expired, and it claims a lifetime of at most one hour.
//!
//! # Example
//!
//! ```ignore
//! use tasknest_auth::{create_session_token, verify_session_token};
//! use tasknest_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_session_token(7, "alice", "Europe/Madrid", &config)?;
//! let claims = verify_session_token(&token, &config)?;
//! assert_eq!(claims.id, 7);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::SessionClaims;
pub use jwt::{TokenError, create_session_token, verify_session_token};
