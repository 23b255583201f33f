//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `DockError`は`external_message()`と`status_code()`メソッドを提供し、
//! 内部情報を漏らさないHTTPエラーレスポンスを生成できます。

use axum::http::StatusCode;
use thiserror::Error;

/// logdock error type
#[derive(Debug, Error)]
pub enum DockError {
    /// Configuration error (startup only)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request validation error (malformed log batch)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication error (capability token or operator credentials)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict error (e.g., duplicate resource)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DockError {
    /// Returns a safe error message for external clients.
    ///
    /// Authentication failures collapse to a single message so that a caller
    /// cannot tell a structural token failure from a signature mismatch, nor
    /// a wrong operator username from a wrong password. Full error details
    /// are available via `Display` for server-side logs only.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "Server misconfigured",
            Self::Validation(_) => "Request validation failed",
            Self::Authentication(_) => "Authentication failed",
            Self::NotFound(_) => "Not found",
            Self::Conflict(_) => "Resource conflict",
            Self::Database(_) => "Database error",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias
pub type DockResult<T> = Result<T, DockError>;
