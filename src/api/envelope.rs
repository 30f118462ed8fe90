//! Response envelope shared by every endpoint.
//!
//! Success: `{ "data": T, "meta": { "timestamp", "version" } }`
//! Failure: `{ "error": { "code", "message" }, "meta": { ... } }`
//!
//! The HTTP status of a failure is derived from its [`ErrorCode`], so the
//! status line and the `code` field cannot disagree.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ErrorCode;

/// Reported in `meta.version`; matches the `/api/v1` prefix.
pub const API_VERSION: &str = "1";

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
}

impl ResponseMeta {
    fn now() -> Self {
        Self {
            timestamp: Utc::now(),
            version: API_VERSION,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Response {
        Json(Self {
            data,
            meta: ResponseMeta::now(),
        })
        .into_response()
    }
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ErrorDetail,
    pub meta: ResponseMeta,
}

impl ApiErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Response {
        let body = Self {
            error: ErrorDetail {
                code,
                message: message.into(),
            },
            meta: ResponseMeta::now(),
        };
        (code.status(), Json(body)).into_response()
    }

    /// Malformed query string or body, rejected before any library call.
    pub fn bad_request(message: impl Into<String>) -> Response {
        Self::new(ErrorCode::BadRequest, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ok_response_shape() {
        let resp = ApiResponse::ok(serde_json::json!({"drills": []}));
        assert_eq!(resp.status(), StatusCode::OK);

        let v = body_json(resp).await;
        assert!(v["data"]["drills"].is_array());
        assert_eq!(v["meta"]["version"], API_VERSION);
        assert!(v["meta"]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_error_status_follows_code() {
        let resp = ApiErrorResponse::new(ErrorCode::Conflict, "swap already used");
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let v = body_json(resp).await;
        assert_eq!(v["error"]["code"], "CONFLICT");
        assert_eq!(v["error"]["message"], "swap already used");
    }

    #[test]
    fn test_every_code_has_client_or_server_status() {
        for code in [
            ErrorCode::BadRequest,
            ErrorCode::NotFound,
            ErrorCode::Conflict,
            ErrorCode::Forbidden,
        ] {
            assert!(code.status().is_client_error(), "{code:?}");
        }
        assert!(ErrorCode::InternalError.status().is_server_error());
    }
}
