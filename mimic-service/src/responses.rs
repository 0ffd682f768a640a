//! HTTP response builders with correct status codes
//!
//! ## Status Codes Provided
//!
//! - **201 Created** - Word created (POST), with a `Location` header
//! - **204 No Content** - Word deactivated (DELETE)
//!
//! Field-level validation failures are collected in a [`ValidationError`] and
//! reach the client as a 422 through
//! [`ApiError::validation_failed`](crate::handlers::ApiError::validation_failed).
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use mimic_service::responses::{Created, ValidationError};
//!
//! async fn create_word() -> Result<Created<WordDto>, ApiError> {
//!     let mut errors = ValidationError::new("Validation failed");
//!     errors.add_field_error("name", "REQUIRED", "Name is required");
//!     Err(ApiError::validation_failed(ApiOperation::Create, errors))
//! }
//! ```

use std::collections::BTreeMap;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// 201 Created
// ============================================================================

/// HTTP 201 Created response
///
/// Carries the created representation as its body and, optionally, a
/// `Location` header pointing to the new resource.
#[derive(Debug)]
pub struct Created<T> {
    data: T,
    location: Option<String>,
}

impl<T> Created<T> {
    /// Create a new 201 Created response
    pub fn new(data: T) -> Self {
        Self {
            data,
            location: None,
        }
    }

    /// Add a Location header pointing to the created resource
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// The created representation
    pub fn data(&self) -> &T {
        &self.data
    }

    /// The Location header value, if set
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::CREATED, Json(&self.data)).into_response();

        if let Some(location) = self.location {
            if let Ok(header_value) = HeaderValue::from_str(&location) {
                response.headers_mut().insert(header::LOCATION, header_value);
            }
        }

        response
    }
}

// ============================================================================
// 204 No Content
// ============================================================================

/// HTTP 204 No Content response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

// ============================================================================
// Validation errors
// ============================================================================

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error code (e.g., "REQUIRED", "TOO_LONG", "OUT_OF_RANGE")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Field errors collected while validating a request body
///
/// Errors are keyed by field name in a stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
    /// Field-level validation errors
    pub errors: BTreeMap<String, Vec<FieldError>>,
}

impl ValidationError {
    /// Create an empty collector with a summary message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }

    /// Add a field-level error
    pub fn add_field_error(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        let field = field.into();
        let error = FieldError {
            field: field.clone(),
            code: code.into(),
            message: message.into(),
        };

        self.errors.entry(field).or_default().push(error);
    }

    /// Summary message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if there are any validation errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        id: u64,
        name: String,
    }

    #[test]
    fn test_created_response() {
        let data = TestData {
            id: 1,
            name: "Test".to_string(),
        };
        let response = Created::new(data).with_location("/api/v1/words/1").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/api/v1/words/1"
        );
    }

    #[test]
    fn test_created_without_location() {
        let response = Created::new("x").into_response();
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[test]
    fn test_no_content_response() {
        let response = NoContent.into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_validation_error() {
        let mut error = ValidationError::new("Validation failed");
        error.add_field_error("name", "REQUIRED", "Name is required");
        error.add_field_error("name", "TOO_LONG", "Name is too long");
        error.add_field_error("score", "OUT_OF_RANGE", "Score out of range");

        assert!(error.has_errors());
        assert_eq!(error.errors.len(), 2);
        assert_eq!(error.errors.get("name").unwrap().len(), 2);
        assert_eq!(error.errors.get("score").unwrap().len(), 1);
        assert_eq!(error.message(), "Validation failed");
    }
}
