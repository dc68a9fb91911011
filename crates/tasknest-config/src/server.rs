//! Server process configuration.
//!
//! # Environment Variables
//!
//! - `BIND_ADDR`: listener address (default `0.0.0.0:3000`)
//! - `DATABASE_URL`: SQLite connection string (default `sqlite://app_data.db`)
//! - `ASSETS_DIR`: directory served under `/assets` (default `./assets`)
//! - `LOG_DIR`: directory for rotated log files (default `storage/logs`)

use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub assets_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            assets_dir: env::var("ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            database_url: "sqlite://app_data.db".into(),
            assets_dir: PathBuf::from("./assets"),
            log_dir: PathBuf::from("storage/logs"),
        }
    }
}
