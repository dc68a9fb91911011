//! # tasknest DB
//!
//! SQLite connection pool, embedded migrations and the typed storage error used by
//! every store.
//!
//! # Example
//!
//! ```ignore
//! use tasknest_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = init_db_pool("sqlite://app_data.db").await?;
//!     // Use pool for database operations
//! }
//! ```

pub mod error;

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

pub use error::StoreError;
// Re-export SqlitePool for convenience
pub use sqlx::SqlitePool;

/// Schema migrations embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens (creating if missing) the SQLite database and applies pending migrations.
///
/// The returned pool is cheaply cloneable and safe to share across request tasks.
pub async fn init_db_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    info!(database_url = %database_url, "Database connected and migrated");

    Ok(pool)
}

/// Private in-memory database with migrations applied; a single connection so every
/// query sees the same schema.
pub async fn init_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;

    Ok(pool)
}
