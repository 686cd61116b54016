//! Structured error handling for the REST service.
//!
//! Store failures are classified into domain errors carrying an HTTP status;
//! every error surfaces to clients as a JSON `{message}` body.

use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use sqlx::mysql::MySqlDatabaseError;
use thiserror::Error;
use tracing::error;

/// MySQL duplicate-key error (unique constraint violation).
const ER_DUP_ENTRY: u16 = 1062;
/// MySQL unknown-database error.
const ER_BAD_DB_ERROR: u16 = 1049;

/// Application error type with automatic HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Internal: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a not found error for an entity.
    pub fn not_found(entity: &str, id: impl Display) -> Self {
        Self::NotFound(format!("{entity} not found: {id}"))
    }

    /// HTTP status class for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unavailable(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Classify raw store failures into domain errors.
///
/// Recognized MySQL error codes map to specific kinds; anything else carries
/// its original message through unchanged. Errors the application raised
/// itself are already typed and never reach this conversion.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) => {
                if let Some(mysql) = db.try_downcast_ref::<MySqlDatabaseError>() {
                    match mysql.number() {
                        ER_DUP_ENTRY => {
                            return Self::Conflict(
                                "Duplicate entry. The value you provided already exists."
                                    .to_string(),
                            );
                        }
                        ER_BAD_DB_ERROR => {
                            return Self::Unavailable(
                                "Database does not exist or is unreachable.".to_string(),
                            );
                        }
                        _ => {}
                    }
                }
                Self::Internal(e.to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => Self::Unavailable(e.to_string()),
            _ => Self::Internal(e.to_string()),
        }
    }
}

/// JSON error body: `{message}` plus a diagnostic detail in debug builds.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Unhandled error");
        }
        let detail = if cfg!(debug_assertions) {
            Some(format!("{self:?}"))
        } else {
            None
        };
        let message = match self {
            Self::NotFound(msg)
            | Self::InvalidArgument(msg)
            | Self::Conflict(msg)
            | Self::Unavailable(msg)
            | Self::Internal(msg) => msg,
        };
        (status, Json(ErrorBody { message, detail })).into_response()
    }
}
