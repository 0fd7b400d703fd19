//! Chat endpoint.
//!
//! POST /chat?user_id=<id>
//!
//! Body: `{"user_message": "..."}`. `user_id` may also be given in the body;
//! the query string wins when both are present. The reply is returned
//! verbatim as `{"assistant_response": "..."}`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ChatQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_message: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub assistant_response: String,
}

/// POST /chat - Relay one user message to the configured assistant(s).
pub async fn chat(
    State(state): State<AppState>,
    query: Result<Query<ChatQuery>, QueryRejection>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let user_id = required("user_id", query.user_id.or(body.user_id))?;
    let user_message = required("user_message", body.user_message)?;

    let request_id = Uuid::now_v7();
    let span = tracing::info_span!("chat", %request_id, user_id = %user_id);

    async move {
        let service = &state.chat_service;
        match service.chat(&user_id, &user_message).await {
            Ok(outcome) => {
                tracing::info!(
                    assistant = %outcome.assistant_id,
                    conversation = %outcome.conversation_id,
                    used_fallback = outcome.used_fallback,
                    active_sessions = service.sessions().len(),
                    "Chat reply delivered"
                );
                Ok(Json(ChatResponse {
                    assistant_response: outcome.text,
                }))
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    attempts = err.attempts().len(),
                    "No assistant produced a reply"
                );
                Err(AppError::Chat(err))
            }
        }
    }
    .instrument(span)
    .await
}

/// Reject absent or empty fields; any other value is passed on untouched.
fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}
