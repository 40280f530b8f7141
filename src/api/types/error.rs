//! JSON error bodies

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    ServerError,
    ServiceUnavailableError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ServerError => write!(f, "server_error"),
            Self::ServiceUnavailableError => write!(f, "service_unavailable_error"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: None,
                    missing_fields: None,
                },
            },
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    /// 400 listing every absent required field
    pub fn missing_fields(fields: Vec<String>) -> Self {
        let mut err = Self::bad_request(format!("Missing required fields: {}", fields.join(", ")))
            .with_code("missing_fields");
        err.response.error.missing_fields = Some(fields);
        err
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    /// 500 carrying the underlying cause
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorType::ServerError,
            format!("Internal server error: {}", cause),
        )
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorType::ServiceUnavailableError,
            message,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::MissingFields { fields } => Self::missing_fields(fields),
            DomainError::Validation { message } => Self::bad_request(message),
            other => {
                error!(error = %other, upstream = other.is_upstream(), "Request failed");
                Self::internal(other)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_body() {
        let err = ApiError::missing_fields(vec!["message".to_string(), "grade".to_string()]);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let json = serde_json::to_value(&err.response).unwrap();
        assert_eq!(json["error"]["message"], "Missing required fields: message, grade");
        assert_eq!(json["error"]["type"], "invalid_request_error");
        assert_eq!(json["error"]["missing_fields"], serde_json::json!(["message", "grade"]));
    }

    #[test]
    fn test_upstream_error_is_500_with_cause() {
        let err: ApiError = DomainError::provider("anthropic", "HTTP 529: overloaded").into();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.response.error.error_type, ApiErrorType::ServerError);
        assert!(err.response.error.message.starts_with("Internal server error: "));
        assert!(err.response.error.message.contains("HTTP 529: overloaded"));
    }

    #[test]
    fn test_domain_error_conversion() {
        let err: ApiError = DomainError::not_found("No learning progression for topic 'x'").into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err: ApiError = DomainError::vector_store("timeout").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let err: ApiError = DomainError::validation("mastery_level must be between 0 and 1").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.response.error.missing_fields.is_none());
    }

    #[test]
    fn test_optional_fields_skipped() {
        let json = serde_json::to_string(&ApiError::not_found("nope").response).unwrap();
        assert!(!json.contains("missing_fields"));
        assert!(!json.contains("code"));
    }
}
