//! # tasknest Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: session token configuration
//! - [`server`]: listener address, database location, static assets and log directory
//!
//! # Example
//!
//! ```ignore
//! use tasknest_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use jwt::JwtConfig;
pub use server::ServerConfig;
