//! Application error type mapping to HTTP status codes.
//!
//! Error bodies have the shape `{"detail": "..."}`. Chat failures never
//! expose upstream details to the caller.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatrelay_types::error::ChatError;

/// Detail returned for every failed chat dispatch.
pub const CHAT_FAILURE_DETAIL: &str = "Failed to get a response from the assistant";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// No assistant produced a reply.
    Chat(ChatError),
    /// The request was missing or had malformed fields.
    Validation(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Chat(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                CHAT_FAILURE_DETAIL.to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
