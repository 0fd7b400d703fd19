//! AssistantClient trait definition.
//!
//! This is the core abstraction over the hosted assistant platform. It
//! exposes exactly the three remote operations the chat flow consumes.

use std::future::Future;

use chatrelay_types::assistant::{AssistantId, AssistantReply, ConversationId};
use chatrelay_types::error::AssistantError;

/// Trait for remote assistant platform backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Every
/// operation is keyed by an assistant configuration id; message operations
/// are additionally keyed by a conversation id.
///
/// Implementations live in chatrelay-infra (e.g., `TaskingAiClient`).
pub trait AssistantClient: Send + Sync {
    /// Human-readable platform name (e.g., "taskingai").
    fn name(&self) -> &str;

    /// Start a new conversation under `assistant`.
    ///
    /// `Ok(None)` means the platform answered but returned no conversation.
    fn create_conversation(
        &self,
        assistant: &AssistantId,
    ) -> impl Future<Output = Result<Option<ConversationId>, AssistantError>> + Send;

    /// Append a user message to an existing conversation.
    fn post_message(
        &self,
        assistant: &AssistantId,
        conversation: &ConversationId,
        text: &str,
    ) -> impl Future<Output = Result<(), AssistantError>> + Send;

    /// Ask the assistant to generate a reply in the conversation.
    ///
    /// `Ok(None)` means the platform answered but produced no reply.
    fn generate_reply(
        &self,
        assistant: &AssistantId,
        conversation: &ConversationId,
    ) -> impl Future<Output = Result<Option<AssistantReply>, AssistantError>> + Send;
}
