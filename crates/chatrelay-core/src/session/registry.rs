//! Session registry: get-or-create of remote conversations per user.
//!
//! The registry owns a [`SessionStore`] and decides how keys are scoped. On a
//! cache miss it asks the assistant client to open a new conversation and
//! caches the returned id.
//!
//! There is no concurrency guard around creation. Two concurrent first
//! messages for the same key can both create a conversation; the later
//! insert wins and the earlier id is dropped.

use chatrelay_types::assistant::{AssistantId, ConversationId};
use chatrelay_types::config::SessionScope;
use chatrelay_types::error::AssistantError;

use super::store::{SessionKey, SessionStore};
use crate::assistant::box_client::BoxAssistantClient;

pub struct SessionRegistry<S: SessionStore> {
    store: S,
    scope: SessionScope,
}

impl<S: SessionStore> SessionRegistry<S> {
    pub fn new(store: S, scope: SessionScope) -> Self {
        Self { store, scope }
    }

    pub fn scope(&self) -> SessionScope {
        self.scope
    }

    /// Build the store key for a user talking to `assistant`.
    pub fn key_for(&self, assistant: &AssistantId, user_id: &str) -> SessionKey {
        match self.scope {
            SessionScope::PerAssistant => SessionKey::scoped(assistant, user_id),
            SessionScope::Shared => SessionKey::shared(user_id),
        }
    }

    /// Cached conversation id, without creating one.
    pub fn lookup(&self, assistant: &AssistantId, user_id: &str) -> Option<ConversationId> {
        self.store.get(&self.key_for(assistant, user_id))
    }

    /// Return the cached conversation for this user, creating one under
    /// `assistant` if none is cached yet.
    pub async fn get_or_create(
        &self,
        client: &BoxAssistantClient,
        assistant: &AssistantId,
        user_id: &str,
    ) -> Result<ConversationId, AssistantError> {
        let key = self.key_for(assistant, user_id);
        if let Some(conversation) = self.store.get(&key) {
            tracing::debug!(
                user_id,
                assistant = %assistant,
                conversation = %conversation,
                "Reusing cached conversation"
            );
            return Ok(conversation);
        }

        let conversation = client
            .create_conversation(assistant)
            .await?
            .ok_or(AssistantError::ConversationNotCreated)?;

        if let Some(previous) = self.store.insert(key, conversation.clone()) {
            tracing::debug!(
                user_id,
                previous = %previous,
                conversation = %conversation,
                "Concurrent conversation creation, replaced cached id"
            );
        }

        tracing::info!(
            user_id,
            assistant = %assistant,
            conversation = %conversation,
            "Created conversation"
        );
        Ok(conversation)
    }

    /// Number of cached sessions.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
