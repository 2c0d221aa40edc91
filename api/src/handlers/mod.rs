pub mod auth;
pub mod health;
pub mod metrics;
pub mod projects;
pub mod scheduler;
pub mod tasks;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::models::UserClaims;
use serde::Serialize;
use uuid::Uuid;

/// Error body returned by every endpoint: a machine-readable code, a
/// human-readable message, and a trace id to correlate with the logs.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub trace_id: String,
}

/// HTTP status for a given error code string; unknown codes are treated as
/// internal errors rather than leaking as 200s.
fn status_for(code: &str) -> StatusCode {
    match code {
        "unauthorized" => StatusCode::UNAUTHORIZED,
        "forbidden" => StatusCode::FORBIDDEN,
        "not_found" => StatusCode::NOT_FOUND,
        "validation_error" => StatusCode::BAD_REQUEST,
        "conflict" => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            trace_id: Uuid::new_v4().to_string(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (status_for(&self.error), Json(self)).into_response()
    }
}

/// Success envelope wrapping every 200 payload under a `data` key
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Parse the authenticated user's id out of the claims the auth middleware
/// injected; a malformed subject is a stale or foreign token.
pub fn authenticated_user_id(claims: &UserClaims) -> Result<Uuid, ErrorResponse> {
    claims
        .user_id()
        .map_err(|_| ErrorResponse::new("unauthorized", "Invalid token subject"))
}
