//! JSON extractor whose rejections use the API error body

use axum::{
    extract::{rejection::JsonRejection as AxumRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::{de::DeserializeOwned, Serialize};

use super::error::{ApiErrorDetail, ApiErrorResponse, ApiErrorType};

#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

/// Malformed or undecodable request body
#[derive(Debug)]
pub struct JsonRejection {
    status: StatusCode,
    message: String,
}

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            error: ApiErrorDetail {
                message: self.message,
                error_type: ApiErrorType::InvalidRequestError,
                code: Some("json_parse_error".to_string()),
                missing_fields: None,
            },
        };

        (self.status, AxumJson(body)).into_response()
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        AxumJson::<T>::from_request(req, state)
            .await
            .map(|AxumJson(value)| Json(value))
            .map_err(|rejection| JsonRejection {
                status: rejection.status(),
                message: describe(&rejection),
            })
    }
}

fn describe(rejection: &AxumRejection) -> String {
    match rejection {
        AxumRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        AxumRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err.body_text()),
        AxumRejection::MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        AxumRejection::BytesRejection(err) => {
            format!("Failed to read request body: {}", err.body_text())
        }
        _ => "Invalid JSON request".to_string(),
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct GradeOnly {
        grade: u32,
    }

    fn request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn rejection_body(rejection: JsonRejection) -> (StatusCode, serde_json::Value) {
        let response = rejection.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_extracts_valid_body() {
        let Json(body) = Json::<GradeOnly>::from_request(request(Some("application/json"), r#"{"grade": 9}"#), &())
            .await
            .unwrap();
        assert_eq!(body.grade, 9);
    }

    #[tokio::test]
    async fn test_wrong_type_is_json_error() {
        let rejection = Json::<GradeOnly>::from_request(
            request(Some("application/json"), r#"{"grade": "nine"}"#),
            &(),
        )
        .await
        .unwrap_err();

        let (status, body) = rejection_body(rejection).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "json_parse_error");
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert!(body["error"]["message"].as_str().unwrap().starts_with("Invalid JSON data"));
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let rejection = Json::<GradeOnly>::from_request(request(None, r#"{"grade": 9}"#), &())
            .await
            .unwrap_err();

        let (status, body) = rejection_body(rejection).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body["error"]["message"].as_str().unwrap().contains("Content-Type"));
    }
}
