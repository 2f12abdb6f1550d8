//! Typed error handling for the petstore service
//!
//! Every operation of the orchestration layer returns a [`PetstoreResult`].
//! The error type separates caller mistakes (4xx) from failures of the
//! service itself (5xx) so that the response boundary can surface the former
//! verbatim and hide the latter behind a generic message.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: the payload, query or path does not have the
//!   expected shape (missing field, wrong type, bad enum value, bad date)
//! - [`PetstoreError::Referential`]: an order references a pet that does not exist
//! - [`PetstoreError::NotFound`]: an entity id does not resolve
//! - [`PetstoreError::Unauthorized`]: the request carries no usable credentials
//! - [`PetstoreError::Storage`] / [`PetstoreError::Internal`]: anything else
//!
//! # Example
//!
//! ```rust,ignore
//! match handlers::orders::get(&db, 42, false).await {
//!     Ok(order) => println!("{:?}", order),
//!     Err(PetstoreError::NotFound { entity }) => println!("no such {}", entity),
//!     Err(e) => eprintln!("failed: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Message returned to callers in place of internal failure details
pub const GENERIC_SERVER_ERROR: &str = "Internal server error";

/// The main error type of the service
#[derive(Debug, Error)]
pub enum PetstoreError {
    /// The request does not have the expected shape
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An order association references a pet that does not exist
    #[error("Invalid petId: Pet {pet_id} does not exist")]
    Referential { pet_id: i64 },

    /// The addressed entity does not exist
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Missing or rejected credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Storage backend failure
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Any other unexpected failure
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Errors raised while normalizing an externally-shaped payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required property is absent (or explicitly null)
    #[error("'{field}' is a required property")]
    MissingField { field: String },

    /// A date string is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDateFormat { value: String },

    /// A value has the wrong type, range or enum member
    #[error("{field}: {message}")]
    InvalidShape { field: String, message: String },
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        ValidationError::MissingField {
            field: field.into(),
        }
    }

    pub fn shape(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidShape {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Machine-readable kind of the error
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "missing-required-field",
            ValidationError::InvalidDateFormat { .. } => "invalid-date-format",
            ValidationError::InvalidShape { .. } => "invalid-shape",
        }
    }
}

/// Error body sent to HTTP callers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// Short category title
    pub title: &'static str,
    /// Error family
    #[serde(rename = "type")]
    pub error_type: &'static str,
    /// Error code for programmatic handling
    pub code: &'static str,
    /// Human-readable message, safe to show to the caller
    pub detail: String,
}

impl PetstoreError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PetstoreError::Validation(_) => StatusCode::BAD_REQUEST,
            PetstoreError::Referential { .. } => StatusCode::BAD_REQUEST,
            PetstoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            PetstoreError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            PetstoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PetstoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PetstoreError::Validation(ValidationError::MissingField { .. }) => "MISSING_FIELD",
            PetstoreError::Validation(ValidationError::InvalidDateFormat { .. }) => {
                "INVALID_DATE_FORMAT"
            }
            PetstoreError::Validation(ValidationError::InvalidShape { .. }) => "INVALID_SHAPE",
            PetstoreError::Referential { .. } => "INVALID_REFERENCE",
            PetstoreError::NotFound { .. } => "NOT_FOUND",
            PetstoreError::Unauthorized { .. } => "UNAUTHORIZED",
            PetstoreError::Storage(_) => "STORAGE_ERROR",
            PetstoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error is the caller's fault
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Convert to an error response
    ///
    /// Server-side failures never leak their message; the detail is replaced
    /// by [`GENERIC_SERVER_ERROR`].
    pub fn to_response(&self) -> ErrorResponse {
        let (title, error_type) = match self {
            PetstoreError::Validation(_) | PetstoreError::Referential { .. } => {
                ("Validation Errors", "Data Errors")
            }
            PetstoreError::NotFound { .. } => ("Not Found", "Data Errors"),
            PetstoreError::Unauthorized { .. } => ("Unauthorized", "Auth Errors"),
            PetstoreError::Storage(_) | PetstoreError::Internal(_) => {
                ("Server Error", "Server Errors")
            }
        };

        let detail = if self.is_client_error() {
            self.to_string()
        } else {
            GENERIC_SERVER_ERROR.to_string()
        };

        ErrorResponse {
            status: self.status_code().as_u16(),
            title,
            error_type,
            code: self.error_code(),
            detail,
        }
    }
}

impl IntoResponse for PetstoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed: {:#}", self);
        } else {
            tracing::debug!(code = self.error_code(), "request rejected: {}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<serde_json::Error> for PetstoreError {
    fn from(err: serde_json::Error) -> Self {
        PetstoreError::Validation(ValidationError::shape("body", err.to_string()))
    }
}

/// A specialized Result type for petstore operations
pub type PetstoreResult<T> = Result<T, PetstoreError>;
