//! Error types returned by request handlers.
//!
//! Handlers return [`AppError`]. Its [`IntoResponse`] implementation does not render
//! anything itself: it produces a bare status response and records a [`Fault`] in the
//! response extensions, which the handler adapter turns into an error view or the JSON
//! fallback.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// A structured failure with an HTTP status and a message.
///
/// Raised by any handler step that must short-circuit the normal success flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The backing store could not be reached or is locked.
    pub fn storage_unavailable() -> Self {
        Self::internal("error 500: database temporarily out of service")
    }
}

/// Error returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Anything that is not a typed API error, e.g. a view that failed to render.
    #[error("unexpected fault: {0}")]
    Unexpected(anyhow::Error),
}

impl AppError {
    pub fn unexpected<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Unexpected(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Api(err) => err.status,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Cloneable record of a handler failure, carried in response extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    Api(ApiError),
    Unexpected(String),
}

impl Fault {
    pub fn message(&self) -> &str {
        match self {
            Fault::Api(err) => &err.message,
            Fault::Unexpected(message) => message,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Fault::Api(err) => err.status,
            Fault::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for Fault {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Api(err) => Fault::Api(err),
            AppError::Unexpected(err) => Fault::Unexpected(format!("{err:#}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let fault = Fault::from(self);
        let mut response = fault.status().into_response();
        response.extensions_mut().insert(fault);
        response
    }
}
