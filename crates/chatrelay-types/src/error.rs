use thiserror::Error;

use crate::assistant::{AssistantId, AssistantRole};

/// Errors from remote assistant platform operations.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("platform returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited by assistant platform")]
    RateLimited,

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("conversation creation returned nothing")]
    ConversationNotCreated,

    #[error("reply generation returned nothing")]
    EmptyReply,
}

/// A single failed run of the one-shot chat procedure against one assistant.
#[derive(Debug, Error)]
#[error("{role} assistant '{assistant}' failed: {source}")]
pub struct AttemptError {
    pub assistant: AssistantId,
    pub role: AssistantRole,
    pub source: AssistantError,
}

/// Errors from chat dispatch.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The primary assistant failed and no fallback was attempted.
    #[error("{0}")]
    Primary(AttemptError),

    /// Both the primary and the fallback assistant failed.
    #[error("all assistants failed: {primary}; {fallback}")]
    Exhausted {
        primary: AttemptError,
        fallback: AttemptError,
    },
}

impl ChatError {
    /// Every failed attempt, in the order they were made.
    pub fn attempts(&self) -> Vec<&AttemptError> {
        match self {
            ChatError::Primary(primary) => vec![primary],
            ChatError::Exhausted { primary, fallback } => vec![primary, fallback],
        }
    }

    /// Whether the fallback assistant was tried before giving up.
    pub fn fallback_attempted(&self) -> bool {
        matches!(self, ChatError::Exhausted { .. })
    }
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}
