//! TaskingAiClient -- concrete [`AssistantClient`] for the TaskingAI platform.
//!
//! Talks to the assistant endpoints of the v1 REST API:
//! - `POST /v1/assistants/{assistant_id}/chats`
//! - `POST /v1/assistants/{assistant_id}/chats/{chat_id}/messages`
//! - `POST /v1/assistants/{assistant_id}/chats/{chat_id}/generate`
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the `Authorization` header.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use chatrelay_core::assistant::client::AssistantClient;
use chatrelay_types::assistant::{AssistantId, AssistantReply, ConversationId};
use chatrelay_types::config::DEFAULT_PLATFORM_BASE_URL;
use chatrelay_types::error::AssistantError;

use super::types::{
    ChatData, CreateChatRequest, CreateMessageRequest, Envelope, GenerateRequest, MessageData,
};

/// Client for the hosted TaskingAI assistant API.
///
/// A missing API key is not rejected up front: requests are sent without
/// credentials and the platform's 401 surfaces as
/// [`AssistantError::AuthenticationFailed`].
pub struct TaskingAiClient {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
}

// No Debug impl: keeps the client (and its key) out of formatted output.

impl TaskingAiClient {
    pub fn new(api_key: Option<SecretString>, timeout: Duration) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AssistantError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_PLATFORM_BASE_URL.to_string(),
        })
    }

    /// Override the base URL (self-hosted platform, proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Append `segments` to the base URL, percent-encoding each one so ids
    /// containing `/`, `?` or `#` stay inside their own path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AssistantError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            AssistantError::Http(format!("invalid platform URL '{}': {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                AssistantError::Http(format!("platform URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// POST a JSON body and unwrap the platform envelope.
    ///
    /// Returns `Ok(None)` when the platform reports success without data.
    async fn post<B, T>(&self, url: Url, body: &B) -> Result<Option<T>, AssistantError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let path = url.path().to_string();
        let mut request = self.client.post(url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| AssistantError::Http(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AssistantError::Http(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        let envelope: Envelope<T> = serde_json::from_str(&text)
            .map_err(|e| AssistantError::Deserialization(format!("{path}: {e}")))?;

        if !envelope.is_success() {
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message: envelope_message(envelope.error.as_ref(), &text),
            });
        }

        Ok(envelope.data)
    }
}

/// Map a non-2xx response to an [`AssistantError`].
fn status_error(status: StatusCode, body: &str) -> AssistantError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AssistantError::AuthenticationFailed,
        StatusCode::TOO_MANY_REQUESTS => AssistantError::RateLimited,
        _ => {
            let error = serde_json::from_str::<Envelope<serde_json::Value>>(body)
                .ok()
                .and_then(|env| env.error);
            AssistantError::Api {
                status: status.as_u16(),
                message: envelope_message(error.as_ref(), body),
            }
        }
    }
}

fn envelope_message(error: Option<&super::types::ErrorBody>, raw: &str) -> String {
    match error {
        Some(err) => match (&err.code, &err.message) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (None, Some(message)) => message.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => raw.to_string(),
        },
        None => raw.to_string(),
    }
}

impl AssistantClient for TaskingAiClient {
    fn name(&self) -> &str {
        "taskingai"
    }

    async fn create_conversation(
        &self,
        assistant: &AssistantId,
    ) -> Result<Option<ConversationId>, AssistantError> {
        let url = self.endpoint(&["v1", "assistants", assistant.as_str(), "chats"])?;
        let chat: Option<ChatData> = self.post(url, &CreateChatRequest::default()).await?;
        Ok(chat.map(|c| ConversationId::from(c.chat_id)))
    }

    async fn post_message(
        &self,
        assistant: &AssistantId,
        conversation: &ConversationId,
        text: &str,
    ) -> Result<(), AssistantError> {
        let url = self.endpoint(&[
            "v1",
            "assistants",
            assistant.as_str(),
            "chats",
            conversation.as_str(),
            "messages",
        ])?;
        let _: Option<MessageData> = self.post(url, &CreateMessageRequest::user(text)).await?;
        Ok(())
    }

    async fn generate_reply(
        &self,
        assistant: &AssistantId,
        conversation: &ConversationId,
    ) -> Result<Option<AssistantReply>, AssistantError> {
        let url = self.endpoint(&[
            "v1",
            "assistants",
            assistant.as_str(),
            "chats",
            conversation.as_str(),
            "generate",
        ])?;
        let message: Option<MessageData> =
            self.post(url, &GenerateRequest { stream: false }).await?;

        Ok(message.and_then(|m| {
            m.content.map(|content| AssistantReply {
                message_id: m.message_id,
                text: content.text,
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    const TEST_KEY: &str = "tk-test-key";

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {TEST_KEY}"))
    }

    async fn create_chat(
        headers: HeaderMap,
        Path(assistant_id): Path<String>,
    ) -> (AxumStatus, Json<Value>) {
        if !authorized(&headers) {
            return (
                AxumStatus::UNAUTHORIZED,
                Json(json!({"status": "error", "error": {"code": "UNAUTHORIZED", "message": "bad key"}})),
            );
        }
        match assistant_id.as_str() {
            "asst_empty" => (AxumStatus::OK, Json(json!({"status": "success", "data": null}))),
            "asst_limited" => (
                AxumStatus::TOO_MANY_REQUESTS,
                Json(json!({"status": "error"})),
            ),
            "asst_broken" => (
                AxumStatus::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "error": {"code": "INTERNAL", "message": "boom"}})),
            ),
            "asst_soft_error" => (
                AxumStatus::OK,
                Json(json!({"status": "error", "error": {"message": "assistant disabled"}})),
            ),
            _ => (
                AxumStatus::OK,
                Json(json!({
                    "status": "success",
                    "data": {"object": "Chat", "chat_id": format!("chat_{assistant_id}"), "assistant_id": assistant_id}
                })),
            ),
        }
    }

    async fn create_message(
        Path((_assistant_id, _chat_id)): Path<(String, String)>,
        Json(body): Json<Value>,
    ) -> (AxumStatus, Json<Value>) {
        let is_user = body["role"] == "user";
        let has_text = body["content"]["text"].as_str().is_some_and(|t| !t.is_empty());
        if is_user && has_text {
            (
                AxumStatus::OK,
                Json(json!({"status": "success", "data": {"message_id": "msg_user", "role": "user", "content": body["content"].clone()}})),
            )
        } else {
            (
                AxumStatus::UNPROCESSABLE_ENTITY,
                Json(json!({"status": "error", "error": {"code": "REQUEST_VALIDATION_ERROR", "message": "bad message"}})),
            )
        }
    }

    async fn generate(
        Path((_assistant_id, chat_id)): Path<(String, String)>,
        Json(body): Json<Value>,
    ) -> (AxumStatus, Json<Value>) {
        if body["stream"] != false {
            return (
                AxumStatus::BAD_REQUEST,
                Json(json!({"status": "error", "error": {"message": "stream must be false"}})),
            );
        }
        if chat_id == "chat_silent" {
            return (AxumStatus::OK, Json(json!({"status": "success", "data": null})));
        }
        (
            AxumStatus::OK,
            Json(json!({
                "status": "success",
                "data": {"message_id": "msg_reply", "role": "assistant", "content": {"text": format!("reply in {chat_id}")}}
            })),
        )
    }

    async fn spawn_platform() -> String {
        let router = Router::new()
            .route("/v1/assistants/{assistant_id}/chats", post(create_chat))
            .route(
                "/v1/assistants/{assistant_id}/chats/{chat_id}/messages",
                post(create_message),
            )
            .route(
                "/v1/assistants/{assistant_id}/chats/{chat_id}/generate",
                post(generate),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str, key: Option<&str>) -> TaskingAiClient {
        TaskingAiClient::new(key.map(SecretString::from), Duration::from_secs(5))
            .unwrap()
            .with_base_url(base_url)
    }

    #[test]
    fn test_provider_name_and_default_base_url() {
        let client = TaskingAiClient::new(None, Duration::from_secs(5)).unwrap();
        assert_eq!(client.name(), "taskingai");
        assert_eq!(client.base_url(), DEFAULT_PLATFORM_BASE_URL);
    }

    #[test]
    fn test_base_url_override_strips_trailing_slash() {
        let client = client("http://localhost:8080/", None);
        assert_eq!(
            client
                .endpoint(&["v1", "assistants", "a", "chats"])
                .unwrap()
                .as_str(),
            "http://localhost:8080/v1/assistants/a/chats"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = client("http://localhost:8080/proxy/", None);
        assert_eq!(
            client.endpoint(&["v1", "assistants"]).unwrap().as_str(),
            "http://localhost:8080/proxy/v1/assistants"
        );
    }

    #[test]
    fn test_endpoint_encodes_reserved_characters_in_ids() {
        let client = client("http://localhost:8080", None);
        assert_eq!(
            client
                .endpoint(&["v1", "assistants", "team/a?x#y", "chats"])
                .unwrap()
                .as_str(),
            "http://localhost:8080/v1/assistants/team%2Fa%3Fx%23y/chats"
        );
    }

    #[test]
    fn test_invalid_base_url_is_http_error() {
        let client = client("not a url", None);
        assert!(matches!(
            client.endpoint(&["v1"]),
            Err(AssistantError::Http(_))
        ));
    }

    #[tokio::test]
    async fn test_ids_with_reserved_characters_reach_their_endpoints() {
        let base = spawn_platform().await;
        let client = client(&base, Some(TEST_KEY));
        let assistant = AssistantId::from("team/a?x#y");

        let conversation = client
            .create_conversation(&assistant)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(conversation.as_str(), "chat_team/a?x#y");

        client
            .post_message(&assistant, &conversation, "hi")
            .await
            .unwrap();
        let reply = client
            .generate_reply(&assistant, &conversation)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reply.text, "reply in chat_team/a?x#y");
    }

    #[tokio::test]
    async fn test_full_exchange() {
        let base = spawn_platform().await;
        let client = client(&base, Some(TEST_KEY));
        let assistant = AssistantId::from("asst_ok");

        let conversation = client
            .create_conversation(&assistant)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(conversation.as_str(), "chat_asst_ok");

        client
            .post_message(&assistant, &conversation, "hi")
            .await
            .unwrap();

        let reply = client
            .generate_reply(&assistant, &conversation)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reply.text, "reply in chat_asst_ok");
        assert_eq!(reply.message_id.as_deref(), Some("msg_reply"));
    }

    #[tokio::test]
    async fn test_create_without_data_is_none() {
        let base = spawn_platform().await;
        let client = client(&base, Some(TEST_KEY));

        let created = client
            .create_conversation(&AssistantId::from("asst_empty"))
            .await
            .unwrap();
        assert!(created.is_none());
    }

    #[tokio::test]
    async fn test_generate_without_data_is_none() {
        let base = spawn_platform().await;
        let client = client(&base, Some(TEST_KEY));

        let reply = client
            .generate_reply(
                &AssistantId::from("asst_ok"),
                &ConversationId::from("chat_silent"),
            )
            .await
            .unwrap();
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_missing_key_is_authentication_failure() {
        let base = spawn_platform().await;
        let client = client(&base, None);

        let err = client
            .create_conversation(&AssistantId::from("asst_ok"))
            .await
            .unwrap_err();
        assert!(matches!(err, AssistantError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let base = spawn_platform().await;
        let client = client(&base, Some(TEST_KEY));

        let err = client
            .create_conversation(&AssistantId::from("asst_limited"))
            .await
            .unwrap_err();
        assert!(matches!(err, AssistantError::RateLimited));
    }

    #[tokio::test]
    async fn test_server_error_carries_platform_message() {
        let base = spawn_platform().await;
        let client = client(&base, Some(TEST_KEY));

        let err = client
            .create_conversation(&AssistantId::from("asst_broken"))
            .await
            .unwrap_err();
        match err {
            AssistantError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "INTERNAL: boom");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_in_success_response() {
        let base = spawn_platform().await;
        let client = client(&base, Some(TEST_KEY));

        let err = client
            .create_conversation(&AssistantId::from("asst_soft_error"))
            .await
            .unwrap_err();
        match err {
            AssistantError::Api { status, message } => {
                assert_eq!(status, 200);
                assert_eq!(message, "assistant disabled");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_platform_is_http_error() {
        let client = client("http://127.0.0.1:1", Some(TEST_KEY));
        let err = client
            .create_conversation(&AssistantId::from("asst_ok"))
            .await
            .unwrap_err();
        assert!(matches!(err, AssistantError::Http(_)));
    }
}
