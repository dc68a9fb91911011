//! Typed storage errors.
//!
//! Driver errors are classified by sqlx error variant and SQLite result code so that
//! handlers can tell an unreachable store apart from a missing record without looking
//! at message text.

use tasknest_core::ApiError;

/// Error returned by every storage operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("record not found")]
    NotFound,

    #[error("record conflicts with an existing one: {0}")]
    Conflict(String),

    #[error("an affected row was expected")]
    NoRowsAffected,

    #[error("storage error: {0}")]
    Unexpected(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

// SQLite primary result codes that mean the store itself cannot serve the request.
// SQLITE_ERROR is included because a missing table surfaces with it.
const SQLITE_ERROR: i32 = 1;
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_READONLY: i32 = 8;
const SQLITE_IOERR: i32 = 10;
const SQLITE_CORRUPT: i32 = 11;
const SQLITE_FULL: i32 = 13;
const SQLITE_CANTOPEN: i32 = 14;
const SQLITE_NOTADB: i32 = 26;

fn is_unavailable_code(code: i32) -> bool {
    matches!(
        code & 0xff,
        SQLITE_ERROR
            | SQLITE_BUSY
            | SQLITE_LOCKED
            | SQLITE_READONLY
            | SQLITE_IOERR
            | SQLITE_CORRUPT
            | SQLITE_FULL
            | SQLITE_CANTOPEN
            | SQLITE_NOTADB
    )
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StoreError::Unavailable(err.to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    return StoreError::Conflict(db_err.message().to_string());
                }
                let code = db_err.code().and_then(|code| code.parse::<i32>().ok());
                match code {
                    Some(code) if is_unavailable_code(code) => {
                        StoreError::Unavailable(db_err.message().to_string())
                    }
                    _ => StoreError::Unexpected(db_err.message().to_string()),
                }
            }
            _ => StoreError::Unexpected(err.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(_) => ApiError::storage_unavailable(),
            StoreError::NotFound => ApiError::not_found("error 404: not found"),
            other => ApiError::internal(format!("error 500: {other}")),
        }
    }
}
