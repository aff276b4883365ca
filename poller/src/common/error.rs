//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `PollerError`は`status_code()`と`external_message()`を提供し、
//! API境界でのレスポンス変換に使用する。

use axum::http::StatusCode;
use thiserror::Error;

/// service poller error type
#[derive(Debug, Error)]
pub enum PollerError {
    /// Malformed input (missing/invalid url, missing id or status)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Underlying store failure (connectivity, constraint violation, malformed query)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PollerError {
    /// Returns a safe error message for external clients.
    ///
    /// Full error details (SQL messages, file paths) are only written to server logs.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Invalid request",
            Self::Database(_) => "Database error",
            Self::Config(_) => "Internal server error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true if the error was caused by a UNIQUE constraint (e.g. duplicate url).
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}

/// Result type alias
pub type PollerResult<T> = Result<T, PollerError>;
