/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP
/// responses. Handlers return `Result<T, ApiError>`, which converts
/// into an error body carrying the human-readable message list from the
/// service layer plus a stable error code.
///
/// Status mapping: service `NotFound` → 404, `Forbidden` → 403,
/// `QuotaExceeded` → 409, `Validation` → 422, `OperationFailed` → 500.
///
/// # Example
///
/// ```
/// use tasklists_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::json;
///
/// async fn handler() -> ApiResult<Json<serde_json::Value>> {
///     Ok(Json(json!({ "ok": true })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tasklists_core::result::{ErrorKind, ServiceError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// A failure reported by the service layer
    Service(ServiceError),

    /// Request validation failed before the service was invoked (422)
    Validation(Vec<ValidationErrorDetail>),

    /// Malformed request (400)
    BadRequest(String),

    /// Internal server error (500)
    Internal(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error code (e.g., "not_found", "forbidden")
    pub error: String,

    /// Human-readable error messages
    pub errors: Vec<String>,

    /// Per-field validation errors, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Service(err) => write!(f, "{err}"),
            ApiError::Validation(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            ApiError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, errors, details) = match self {
            ApiError::Service(err) => {
                let status = match err.kind {
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::Forbidden => StatusCode::FORBIDDEN,
                    ErrorKind::QuotaExceeded => StatusCode::CONFLICT,
                    ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorKind::OperationFailed => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.kind.as_str(), err.errors, None)
            }
            ApiError::Validation(details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                vec!["Request validation failed".to_string()],
                Some(details),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", vec![msg], None),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    vec!["An internal error occurred".to_string()],
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            errors,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert service errors to API errors
impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

/// Convert validator output into per-field details
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| ValidationErrorDetail {
                    field: field.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value for {field}")),
                })
            })
            .collect();

        ApiError::Validation(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklists_core::result::messages;

    #[test]
    fn test_error_display() {
        let err = ApiError::Service(ServiceError::not_found(messages::COLLECTION_NOT_FOUND));
        assert_eq!(err.to_string(), "Collection not found");

        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ApiError::Validation(vec![
            ValidationErrorDetail {
                field: "name".to_string(),
                message: "Name must be between 1 and 255 characters".to_string(),
            },
            ValidationErrorDetail {
                field: "owner_id".to_string(),
                message: "OwnerId is required".to_string(),
            },
        ]);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }
}
