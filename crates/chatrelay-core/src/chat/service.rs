//! Chat service: runs the one-shot procedure under the configured strategy.
//!
//! One-shot procedure, per assistant and per request:
//! resolve conversation -> post user message -> generate reply -> reply text.
//! Every failure along the way becomes an [`AttemptError`]; nothing is
//! retried except the single hop to the fallback assistant.

use chatrelay_types::assistant::{
    AssistantId, AssistantReply, AssistantRole, ChatOutcome, ConversationId,
};
use chatrelay_types::error::{AssistantError, AttemptError, ChatError};

use super::strategy::DispatchStrategy;
use crate::assistant::box_client::BoxAssistantClient;
use crate::session::registry::SessionRegistry;
use crate::session::store::SessionStore;

/// Dispatches user messages to the remote assistant(s).
///
/// Generic over the session store so tests and alternative deployments can
/// inject their own mapping.
pub struct ChatService<S: SessionStore> {
    client: BoxAssistantClient,
    sessions: SessionRegistry<S>,
    strategy: DispatchStrategy,
}

impl<S: SessionStore> ChatService<S> {
    pub fn new(
        client: BoxAssistantClient,
        sessions: SessionRegistry<S>,
        strategy: DispatchStrategy,
    ) -> Self {
        Self {
            client,
            sessions,
            strategy,
        }
    }

    pub fn strategy(&self) -> &DispatchStrategy {
        &self.strategy
    }

    pub fn sessions(&self) -> &SessionRegistry<S> {
        &self.sessions
    }

    /// Name of the underlying assistant platform client.
    pub fn client_name(&self) -> &str {
        self.client.name()
    }

    /// Send `message` on behalf of `user_id` and return the assistant's reply.
    pub async fn chat(&self, user_id: &str, message: &str) -> Result<ChatOutcome, ChatError> {
        match &self.strategy {
            DispatchStrategy::Single { primary } => self
                .attempt(primary, AssistantRole::Primary, user_id, message)
                .await
                .map_err(ChatError::Primary),
            DispatchStrategy::WithFallback { primary, fallback } => {
                let primary_err = match self
                    .attempt(primary, AssistantRole::Primary, user_id, message)
                    .await
                {
                    Ok(outcome) => return Ok(outcome),
                    Err(err) => err,
                };

                tracing::warn!(
                    user_id,
                    primary = %primary,
                    fallback = %fallback,
                    "Using fallback assistant"
                );

                self.attempt(fallback, AssistantRole::Fallback, user_id, message)
                    .await
                    .map_err(|fallback_err| ChatError::Exhausted {
                        primary: primary_err,
                        fallback: fallback_err,
                    })
            }
        }
    }

    /// Run the one-shot procedure against a single assistant.
    pub async fn attempt(
        &self,
        assistant: &AssistantId,
        role: AssistantRole,
        user_id: &str,
        message: &str,
    ) -> Result<ChatOutcome, AttemptError> {
        match self.run_once(assistant, user_id, message).await {
            Ok((conversation_id, reply)) => Ok(ChatOutcome {
                text: reply.text,
                assistant_id: assistant.clone(),
                conversation_id,
                used_fallback: role == AssistantRole::Fallback,
            }),
            Err(source) => {
                tracing::error!(
                    user_id,
                    assistant = %assistant,
                    %role,
                    error = %source,
                    "Chat attempt failed"
                );
                Err(AttemptError {
                    assistant: assistant.clone(),
                    role,
                    source,
                })
            }
        }
    }

    async fn run_once(
        &self,
        assistant: &AssistantId,
        user_id: &str,
        message: &str,
    ) -> Result<(ConversationId, AssistantReply), AssistantError> {
        let conversation = self
            .sessions
            .get_or_create(&self.client, assistant, user_id)
            .await?;

        self.client
            .post_message(assistant, &conversation, message)
            .await?;

        let reply = self
            .client
            .generate_reply(assistant, &conversation)
            .await?
            .ok_or(AssistantError::EmptyReply)?;

        Ok((conversation, reply))
    }
}
