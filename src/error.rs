//! Unified error handling for the storefront services.
//!
//! Storage failures are the only error class the domain code produces.
//! Everything else here wraps them for the seed report and the HTTP surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

// ============================================================================
// Storage Errors
// ============================================================================

/// Errors raised by a repository or the database handle.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("database error: {0}")]
    Sqlx(sqlx::Error),
}

impl StorageError {
    /// Get a static error code string for logs and API bodies.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "storage_unavailable",
            Self::Constraint(_) => "constraint_violation",
            Self::Migration(_) => "migration_failed",
            Self::Sqlx(_) => "database_error",
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolClosed
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StorageError::Unavailable(err.to_string()),
            sqlx::Error::Database(ref db_err) if is_constraint(&**db_err) => {
                StorageError::Constraint(db_err.message().to_string())
            }
            other => StorageError::Sqlx(other),
        }
    }
}

/// SQLite reports every constraint failure under primary result code 19,
/// with the extended code in the upper bits.
fn is_constraint(db_err: &dyn DatabaseError) -> bool {
    const SQLITE_CONSTRAINT: i32 = 19;

    !matches!(db_err.kind(), ErrorKind::Other)
        || db_err
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .is_some_and(|code| code & 0xff == SQLITE_CONSTRAINT)
}

// ============================================================================
// Seed Errors
// ============================================================================

/// Errors that abort a bootstrap run.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to write seed report: {0}")]
    Report(#[from] std::io::Error),
}

// ============================================================================
// API Errors
// ============================================================================

/// Errors returned by the read-only HTTP surface.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// JSON body sent with every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Storage(e @ StorageError::Unavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, e.error_code())
            }
            ApiError::Storage(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.error_code()),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        }

        let body = ErrorBody {
            error: code,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_closed_is_unavailable() {
        let err = StorageError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert_eq!(err.error_code(), "storage_unavailable");
    }

    #[test]
    fn row_not_found_stays_sqlx() {
        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StorageError::Sqlx(_)));
    }

    #[test]
    fn io_error_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = StorageError::from(sqlx::Error::Io(io));
        assert!(matches!(err, StorageError::Unavailable(_)));
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::NotFound("product abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unavailable_maps_to_503() {
        let err = ApiError::from(StorageError::Unavailable("pool closed".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn constraint_maps_to_500() {
        let err = ApiError::from(StorageError::Constraint("UNIQUE".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
