//! Unified error types for all layers of the catalog service.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the catalog service.
///
/// A cache miss is not an error: cache lookups return `Ok(None)` for an
/// absent or expired key. Every variant here is a real failure.
#[derive(Error, Debug)]
pub enum CatalogError {
    // ============ Infrastructure Errors ============
    /// Cache transport or protocol failure, including read/write timeouts.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Durable store unreachable or query failure.
    #[error("Database error: {0}")]
    Database(String),

    /// A payload could not be encoded or decoded.
    #[error("Format error: {0}")]
    Format(String),

    /// A dependency is not ready to serve traffic.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CatalogError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unavailable(_) => 503,
            Self::Cache(_)
            | Self::Database(_)
            | Self::Format(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Cache(_) => "CACHE_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Format(_) => "FORMAT_ERROR",
            Self::Unavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates a format error.
    #[must_use]
    pub fn format<T: Into<String>>(message: T) -> Self {
        Self::Format(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error came from the cache.
    ///
    /// Cache failures degrade to a store read instead of failing a request.
    #[must_use]
    pub const fn is_cache_failure(&self) -> bool {
        matches!(self, Self::Cache(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `CatalogError`.
    #[must_use]
    pub fn from_error(error: &CatalogError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<&CatalogError> for ErrorResponse {
    fn from(error: &CatalogError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CatalogError::cache("down").status_code(), 500);
        assert_eq!(CatalogError::Database("gone".to_string()).status_code(), 500);
        assert_eq!(CatalogError::format("bad json").status_code(), 500);
        assert_eq!(CatalogError::internal("oops").status_code(), 500);
        assert_eq!(CatalogError::Unavailable("db".to_string()).status_code(), 503);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CatalogError::cache("x").error_code(), "CACHE_ERROR");
        assert_eq!(CatalogError::Database("x".to_string()).error_code(), "DATABASE_ERROR");
        assert_eq!(CatalogError::format("x").error_code(), "FORMAT_ERROR");
        assert_eq!(
            CatalogError::Configuration("x".to_string()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(CatalogError::internal("x").error_code(), "INTERNAL_ERROR");
        assert_eq!(
            CatalogError::Other(anyhow::anyhow!("x")).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_only_cache_errors_degrade() {
        assert!(CatalogError::cache("timeout").is_cache_failure());
        assert!(!CatalogError::Database("timeout".to_string()).is_cache_failure());
        assert!(!CatalogError::format("bad").is_cache_failure());
    }

    #[test]
    fn test_serde_json_error_is_format_error() {
        let err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err = CatalogError::from(err);
        assert!(matches!(err, CatalogError::Format(_)));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = CatalogError::Database("connection refused".to_string());
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "DATABASE_ERROR");
        assert!(response.message.contains("connection refused"));
    }

    #[test]
    fn test_error_response_from_ref() {
        let err = CatalogError::format("unexpected end of input");
        let response: ErrorResponse = ErrorResponse::from(&err);
        assert_eq!(response.code, "FORMAT_ERROR");
    }
}
