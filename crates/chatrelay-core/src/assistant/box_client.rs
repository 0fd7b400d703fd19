//! BoxAssistantClient -- object-safe dynamic dispatch wrapper for AssistantClient.
//!
//! 1. Define an object-safe `AssistantClientDyn` trait with boxed futures
//! 2. Blanket-impl `AssistantClientDyn` for all `T: AssistantClient`
//! 3. `BoxAssistantClient` wraps `Box<dyn AssistantClientDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use chatrelay_types::assistant::{AssistantId, AssistantReply, ConversationId};
use chatrelay_types::error::AssistantError;

use super::client::AssistantClient;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of [`AssistantClient`] with boxed futures.
///
/// A blanket implementation is provided for all types implementing
/// `AssistantClient`.
pub trait AssistantClientDyn: Send + Sync {
    fn name(&self) -> &str;

    fn create_conversation_boxed<'a>(
        &'a self,
        assistant: &'a AssistantId,
    ) -> BoxFuture<'a, Result<Option<ConversationId>, AssistantError>>;

    fn post_message_boxed<'a>(
        &'a self,
        assistant: &'a AssistantId,
        conversation: &'a ConversationId,
        text: &'a str,
    ) -> BoxFuture<'a, Result<(), AssistantError>>;

    fn generate_reply_boxed<'a>(
        &'a self,
        assistant: &'a AssistantId,
        conversation: &'a ConversationId,
    ) -> BoxFuture<'a, Result<Option<AssistantReply>, AssistantError>>;
}

impl<T: AssistantClient> AssistantClientDyn for T {
    fn name(&self) -> &str {
        AssistantClient::name(self)
    }

    fn create_conversation_boxed<'a>(
        &'a self,
        assistant: &'a AssistantId,
    ) -> BoxFuture<'a, Result<Option<ConversationId>, AssistantError>> {
        Box::pin(self.create_conversation(assistant))
    }

    fn post_message_boxed<'a>(
        &'a self,
        assistant: &'a AssistantId,
        conversation: &'a ConversationId,
        text: &'a str,
    ) -> BoxFuture<'a, Result<(), AssistantError>> {
        Box::pin(self.post_message(assistant, conversation, text))
    }

    fn generate_reply_boxed<'a>(
        &'a self,
        assistant: &'a AssistantId,
        conversation: &'a ConversationId,
    ) -> BoxFuture<'a, Result<Option<AssistantReply>, AssistantError>> {
        Box::pin(self.generate_reply(assistant, conversation))
    }
}

/// Type-erased assistant client.
///
/// Lets the application pick the concrete platform client at startup (and
/// lets tests substitute a mock) without making every service generic over it.
pub struct BoxAssistantClient {
    inner: Box<dyn AssistantClientDyn + Send + Sync>,
}

impl BoxAssistantClient {
    /// Wrap a concrete `AssistantClient` in a type-erased box.
    pub fn new<T: AssistantClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn create_conversation(
        &self,
        assistant: &AssistantId,
    ) -> Result<Option<ConversationId>, AssistantError> {
        self.inner.create_conversation_boxed(assistant).await
    }

    pub async fn post_message(
        &self,
        assistant: &AssistantId,
        conversation: &ConversationId,
        text: &str,
    ) -> Result<(), AssistantError> {
        self.inner
            .post_message_boxed(assistant, conversation, text)
            .await
    }

    pub async fn generate_reply(
        &self,
        assistant: &AssistantId,
        conversation: &ConversationId,
    ) -> Result<Option<AssistantReply>, AssistantError> {
        self.inner.generate_reply_boxed(assistant, conversation).await
    }
}
