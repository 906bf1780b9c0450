//! VMC and CSP error response formatting
//!
//! - VMC: `{"error_code": "...", "error_messages": ["..."], "status": 404}`
//! - CSP: `{"statusCode": 400, "message": "...", "error": "invalid_grant"}`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// VMC error response format
pub fn vmc_error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let error_code = match status {
        StatusCode::BAD_REQUEST => "bad.request",
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::NOT_FOUND => "not.found",
        StatusCode::CONFLICT => "conflict",
        _ => "internal.error",
    };

    (
        status,
        Json(json!({
            "error_code": error_code,
            "error_messages": [message.into()],
            "status": status.as_u16(),
        })),
    )
        .into_response()
}

/// CSP error response format
pub fn csp_error_response(status: StatusCode, error: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "statusCode": status.as_u16(),
            "error": error,
            "message": message.into(),
        })),
    )
        .into_response()
}
