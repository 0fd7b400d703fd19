//! Wire types for the TaskingAI REST API.
//!
//! Every response is wrapped in an envelope:
//! `{"status": "success", "data": {...}}` or
//! `{"status": "error", "error": {"code": "...", "message": "..."}}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body for `POST .../chats`. The chat takes its settings from the assistant.
#[derive(Debug, Default, Serialize)]
pub struct CreateChatRequest {}

#[derive(Debug, Deserialize)]
pub struct ChatData {
    pub chat_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageContent {
    pub text: String,
}

/// Body for `POST .../chats/{chat_id}/messages`.
#[derive(Debug, Serialize)]
pub struct CreateMessageRequest {
    pub role: &'static str,
    pub content: MessageContent,
}

impl CreateMessageRequest {
    pub fn user(text: &str) -> Self {
        Self {
            role: "user",
            content: MessageContent {
                text: text.to_string(),
            },
        }
    }
}

/// Body for `POST .../chats/{chat_id}/generate`.
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct MessageData {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub content: Option<MessageContent>,
}
