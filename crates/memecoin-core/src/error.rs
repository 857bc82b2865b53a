//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of the Meme Coin API.
///
/// Persistence failures are the only errors a repository call can surface;
/// cache failures are absorbed below the repository and only appear here
/// when a cache component is used directly (health checks, startup).
#[derive(Error, Debug)]
pub enum MemeCoinError {
    // ============ Domain Errors ============
    /// No matching row for the requested resource.
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// The unique `name` constraint was violated.
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Infrastructure Errors ============
    /// Any other persistence store failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

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

impl MemeCoinError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::DuplicateName(_) => 409,
            Self::Database(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::DuplicateName(_) => "DUPLICATE_NAME",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for errors that map to a 5xx response.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Returns true if this is a "no such row" condition.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a duplicate name error.
    #[must_use]
    pub fn duplicate_name<T: Into<String>>(name: T) -> Self {
        Self::DuplicateName(name.into())
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a database error.
    #[must_use]
    pub fn database<T: Into<String>>(message: T) -> Self {
        Self::Database(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for MemeCoinError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::DuplicateName(db_err.message().to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for MemeCoinError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
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
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `MemeCoinError`.
    ///
    /// Server-side failures are reported with a generic message; their
    /// details stay in the logs.
    #[must_use]
    pub fn from_error(error: &MemeCoinError) -> Self {
        let message = if error.is_server_error() {
            "Internal server error".to_string()
        } else {
            error.to_string()
        };

        Self {
            code: error.error_code().to_string(),
            message,
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&MemeCoinError> for ErrorResponse {
    fn from(error: &MemeCoinError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(MemeCoinError::not_found("Coin", 1).status_code(), 404);
        assert_eq!(MemeCoinError::validation("bad id").status_code(), 400);
        assert_eq!(MemeCoinError::duplicate_name("doge").status_code(), 409);
        assert_eq!(MemeCoinError::database("gone").status_code(), 500);
        assert_eq!(MemeCoinError::Cache("down".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(MemeCoinError::not_found("Coin", 1).error_code(), "NOT_FOUND");
        assert_eq!(MemeCoinError::duplicate_name("doge").error_code(), "DUPLICATE_NAME");
        assert_eq!(MemeCoinError::database("db").error_code(), "DATABASE_ERROR");
        assert_eq!(MemeCoinError::internal("err").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_is_not_found() {
        assert!(MemeCoinError::not_found("Coin", 7).is_not_found());
        assert!(!MemeCoinError::database("db").is_not_found());
    }

    #[test]
    fn test_error_response_hides_server_details() {
        let err = MemeCoinError::database("connection refused to 10.0.0.3");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "DATABASE_ERROR");
        assert_eq!(response.message, "Internal server error");
    }

    #[test]
    fn test_error_response_keeps_client_details() {
        let err = MemeCoinError::duplicate_name("doge");
        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, "DUPLICATE_NAME");
        assert!(response.message.contains("doge"));
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let err = MemeCoinError::validation("bad input");
        let details = vec![FieldError {
            field: "name".to_string(),
            message: "Name must be 1-255 characters".to_string(),
            code: "length".to_string(),
        }];
        let response = ErrorResponse::from_error(&err).with_details(details);
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }

    #[test]
    fn test_sqlx_row_not_found_maps_to_not_found() {
        let err: MemeCoinError = sqlx::Error::RowNotFound.into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_sqlx_other_errors_map_to_database() {
        let err: MemeCoinError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, MemeCoinError::Database(_)));
    }
}
