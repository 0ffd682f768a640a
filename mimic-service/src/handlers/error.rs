//! API error types for handler operations
//!
//! Every handler failure ends up as an [`ApiError`], which maps its kind to an
//! HTTP status through `IntoResponse`. Client mistakes are reported as they
//! are. Anything else becomes a generic `UNEXPECTED` response while the real
//! cause goes to the log.
//!
//! # Example
//!
//! ```rust
//! use mimic_service::handlers::{ApiError, ApiErrorKind};
//!
//! let error = ApiError::not_found("Word", "42");
//! assert!(matches!(error.kind, ApiErrorKind::NotFound));
//! assert_eq!(error.entity_id, Some("42".to_string()));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::links::LinkError;
use crate::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
use crate::responses::{FieldError, ValidationError};

/// Message returned for every unexpected failure
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Operation being performed when the API error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// Listing words
    List,
    /// Getting a single word by ID
    Get,
    /// Creating a new word
    Create,
    /// Replacing an existing word
    Update,
    /// Deactivating a word
    Delete,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The identifier or the filtered set yields nothing
    NotFound,
    /// Missing or malformed request data
    InvalidInput,
    /// Structural validation failed, with field-level detail
    ValidationFailed,
    /// Any other failure
    Unexpected,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::InvalidInput => write!(f, "invalid_input"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::Unexpected => write!(f, "unexpected"),
        }
    }
}

impl ApiErrorKind {
    /// Get the HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error kind
    #[must_use]
    pub fn error_code(&self) -> String {
        self.to_string().to_uppercase()
    }

    /// Whether the client caused the error
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Unexpected)
    }
}

/// Structured API error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The operation being performed when the error occurred
    pub operation: ApiOperation,
    /// The category of error
    pub kind: ApiErrorKind,
    /// Client-facing message
    pub message: String,
    /// The type of entity involved
    pub entity_type: Option<String>,
    /// The ID of the entity involved
    pub entity_id: Option<String>,
    /// Field-level validation errors
    pub field_errors: BTreeMap<String, Vec<FieldError>>,
    /// Underlying cause, logged but never sent to the client
    pub cause: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
            field_errors: BTreeMap::new(),
            cause: None,
        }
    }

    /// Create a "not found" error with entity context
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::NotFound, "Entity not found")
            .with_entity(entity_type, entity_id)
    }

    /// Create an invalid input error
    pub fn invalid_input(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::InvalidInput, message)
    }

    /// Create a validation failed error carrying field-level detail
    pub fn validation_failed(operation: ApiOperation, errors: ValidationError) -> Self {
        let mut error = Self::new(operation, ApiErrorKind::ValidationFailed, errors.message());
        error.field_errors = errors.errors;
        error
    }

    /// Create an unexpected error, keeping `cause` for the log only
    pub fn unexpected(operation: ApiOperation, cause: impl fmt::Display) -> Self {
        let mut error = Self::new(operation, ApiErrorKind::Unexpected, UNEXPECTED_MESSAGE);
        error.cause = Some(cause.to_string());
        error
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Response body for API errors
#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    error: String,
    code: String,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    operation: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    errors: BTreeMap<String, Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();
        let code = self.kind.error_code();

        if self.kind.is_client_error() {
            tracing::warn!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                field_errors = self.field_errors.len(),
                "Request rejected: {}", self.message
            );
        } else {
            tracing::error!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                cause = ?self.cause,
                "API error: {}", self.message
            );
        }

        let response = ApiErrorResponse {
            error: self.message,
            code,
            status: status.as_u16(),
            operation: Some(self.operation.to_string()),
            errors: self.field_errors,
        };

        (status, Json(response)).into_response()
    }
}

/// Convert RepositoryOperation to ApiOperation
fn repository_operation_to_api_operation(op: RepositoryOperation) -> ApiOperation {
    match op {
        RepositoryOperation::ListAll => ApiOperation::List,
        RepositoryOperation::FindById
        | RepositoryOperation::Ping
        | RepositoryOperation::Migrate
        | RepositoryOperation::Connect => ApiOperation::Get,
        RepositoryOperation::Create => ApiOperation::Create,
        RepositoryOperation::Update => ApiOperation::Update,
        RepositoryOperation::SoftDelete => ApiOperation::Delete,
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let operation = repository_operation_to_api_operation(err.operation);

        let mut error = match err.kind {
            RepositoryErrorKind::NotFound => {
                ApiError::new(operation, ApiErrorKind::NotFound, err.message.clone())
            }
            RepositoryErrorKind::ConnectionFailed
            | RepositoryErrorKind::Timeout
            | RepositoryErrorKind::DatabaseError
            | RepositoryErrorKind::Other => ApiError::unexpected(operation, &err),
        };
        error.entity_type = err.entity_type;
        error.entity_id = err.entity_id;
        error
    }
}

impl From<LinkError> for ApiError {
    fn from(err: LinkError) -> Self {
        ApiError::unexpected(ApiOperation::Get, err)
    }
}
