//! # tasknest Core
//!
//! Core types, errors, and utilities shared by every tasknest crate.
//!
//! - [`errors`]: the typed API error, the handler error and the fault record the
//!   handler adapter dispatches on
//! - [`password`]: bcrypt password hashing and verification
//! - [`text`]: display helpers
//!
//! # Example
//!
//! ```ignore
//! use tasknest_core::errors::{ApiError, AppError};
//! use tasknest_core::password::{hash_password, verify_password};
//!
//! let error: AppError = ApiError::not_found("error 404: not found").into();
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;
pub mod text;

// Re-export commonly used types at crate root
pub use errors::{ApiError, AppError, Fault};
pub use password::{hash_password, verify_password};
pub use text::capitalize;
