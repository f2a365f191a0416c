//! JSON envelope shared by every `/api/v1` response.
//!
//! Success: `{ "data": ..., "meta": { "timestamp", "version" } }`
//! Failure: `{ "error": { "code", "message" }, "meta": { ... } }`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Envelope format version, bumped on breaking shape changes.
pub const ENVELOPE_VERSION: &str = "1";

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    /// RFC 3339 time the response was built
    pub timestamp: String,
    pub version: &'static str,
}

impl ResponseMeta {
    fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: ENVELOPE_VERSION,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T: Serialize> ApiResponse<T> {
    /// `200 OK` with `data` as the payload.
    pub fn ok(data: T) -> Response {
        let body = Self {
            data,
            meta: ResponseMeta::now(),
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Stable machine-readable code, e.g. `BAD_REQUEST`
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ErrorDetail,
    pub meta: ResponseMeta,
}

impl ApiErrorResponse {
    fn respond(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
        let body = Self {
            error: ErrorDetail {
                code,
                message: message.into(),
            },
            meta: ResponseMeta::now(),
        };
        (status, Json(body)).into_response()
    }

    /// Unknown route.
    pub fn not_found(message: impl Into<String>) -> Response {
        Self::respond(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    /// Malformed query or rejected operating point.
    pub fn bad_request(message: impl Into<String>) -> Response {
        Self::respond(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// The simulator could not produce a report.
    pub fn internal(message: impl Into<String>) -> Response {
        Self::respond(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}
