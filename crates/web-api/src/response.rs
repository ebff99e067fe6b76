//! Framework-independent HTTP response.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ApiError;

/// Body of an [`ApiResponse`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    /// `application/json`
    Json(Value),
    /// `text/plain`
    Text(String),
}

/// Status code plus body, produced by the handlers in [`crate::sd`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: ApiBody,
}

impl ApiResponse {
    /// JSON response from any serializable value.
    pub fn json<T: Serialize>(status: u16, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => Self {
                status,
                body: ApiBody::Json(value),
            },
            Err(e) => ApiError::Internal(e.to_string()).into(),
        }
    }

    /// `200` JSON response.
    pub fn ok<T: Serialize>(body: &T) -> Self {
        Self::json(200, body)
    }

    /// `200` plain-text response.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: ApiBody::Text(body.into()),
        }
    }

    /// `Content-Type` header value.
    pub fn content_type(&self) -> &'static str {
        match self.body {
            ApiBody::Json(_) => "application/json",
            ApiBody::Text(_) => "text/plain; charset=utf-8",
        }
    }

    /// JSON body, if this is a JSON response.
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            ApiBody::Json(value) => Some(value),
            ApiBody::Text(_) => None,
        }
    }

    /// Body rendered as sent on the wire.
    pub fn body_string(&self) -> String {
        match &self.body {
            ApiBody::Json(value) => value.to_string(),
            ApiBody::Text(text) => text.clone(),
        }
    }
}

impl From<ApiError> for ApiResponse {
    fn from(error: ApiError) -> Self {
        Self {
            status: error.status(),
            body: ApiBody::Json(json!({ "error": error.to_string() })),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = self.content_type();
        (status, [(header::CONTENT_TYPE, content_type)], self.body_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_becomes_json_body() {
        let response = ApiResponse::from(ApiError::NotFound);
        assert_eq!(response.status, 404);
        assert_eq!(response.content_type(), "application/json");
        assert_eq!(response.body_string(), r#"{"error":"API route not found"}"#);
    }

    #[test]
    fn test_text_response() {
        let response = ApiResponse::text("[OK] ready\n");
        assert_eq!(response.status, 200);
        assert!(response.content_type().starts_with("text/plain"));
        assert_eq!(response.json_body(), None);
    }
}
