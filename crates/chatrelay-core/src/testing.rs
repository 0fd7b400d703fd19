//! Scripted assistant client shared by the unit tests in this crate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chatrelay_types::assistant::{AssistantId, AssistantReply, ConversationId};
use chatrelay_types::error::AssistantError;

use crate::assistant::client::AssistantClient;

/// How the mock behaves for one assistant id.
#[derive(Debug, Clone)]
pub enum Script {
    Reply(String),
    CreateFails,
    CreateReturnsNothing,
    PostFails,
    GenerateFails,
    GenerateReturnsNothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(String),
    Post(String, String, String),
    Generate(String, String),
}

#[derive(Clone, Default)]
pub struct ScriptedClient {
    scripts: HashMap<String, Script>,
    calls: Arc<Mutex<Vec<Call>>>,
    counter: Arc<AtomicUsize>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, assistant: &str, script: Script) -> Self {
        self.scripts.insert(assistant.to_string(), script);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Create(_)))
            .count()
    }

    pub fn calls_for(&self, assistant: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| match c {
                Call::Create(a) | Call::Post(a, _, _) | Call::Generate(a, _) => a == assistant,
            })
            .count()
    }

    fn script(&self, assistant: &AssistantId) -> Script {
        self.scripts
            .get(assistant.as_str())
            .cloned()
            .unwrap_or(Script::CreateFails)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AssistantClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn create_conversation(
        &self,
        assistant: &AssistantId,
    ) -> Result<Option<ConversationId>, AssistantError> {
        self.record(Call::Create(assistant.to_string()));
        match self.script(assistant) {
            Script::CreateFails => Err(AssistantError::Http("connection refused".to_string())),
            Script::CreateReturnsNothing => Ok(None),
            _ => {
                let n = self.counter.fetch_add(1, Ordering::SeqCst);
                Ok(Some(ConversationId::from(format!("chat-{assistant}-{n}"))))
            }
        }
    }

    async fn post_message(
        &self,
        assistant: &AssistantId,
        conversation: &ConversationId,
        text: &str,
    ) -> Result<(), AssistantError> {
        self.record(Call::Post(
            assistant.to_string(),
            conversation.to_string(),
            text.to_string(),
        ));
        match self.script(assistant) {
            Script::PostFails => Err(AssistantError::Api {
                status: 500,
                message: "internal error".to_string(),
            }),
            _ => Ok(()),
        }
    }

    async fn generate_reply(
        &self,
        assistant: &AssistantId,
        conversation: &ConversationId,
    ) -> Result<Option<AssistantReply>, AssistantError> {
        self.record(Call::Generate(
            assistant.to_string(),
            conversation.to_string(),
        ));
        match self.script(assistant) {
            Script::Reply(text) => Ok(Some(AssistantReply {
                message_id: Some("msg-1".to_string()),
                text,
            })),
            Script::GenerateFails => Err(AssistantError::RateLimited),
            Script::GenerateReturnsNothing => Ok(None),
            _ => Err(AssistantError::Http("unexpected call".to_string())),
        }
    }
}
