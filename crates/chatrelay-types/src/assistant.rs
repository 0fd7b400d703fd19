//! Assistant, conversation, and reply types.
//!
//! These model the data shapes exchanged with the remote assistant platform:
//! opaque assistant configuration ids, remote conversation ids, generated
//! replies, and the outcome of a dispatched chat.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a remotely configured assistant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssistantId(pub String);

impl AssistantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is blank (unset in configuration).
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for AssistantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssistantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssistantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque identifier of a conversation held by the remote platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ConversationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Which slot of the dispatch strategy an assistant occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantRole {
    Primary,
    Fallback,
}

impl fmt::Display for AssistantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssistantRole::Primary => write!(f, "primary"),
            AssistantRole::Fallback => write!(f, "fallback"),
        }
    }
}

/// A reply generated by the remote assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    /// Platform message id, when the platform reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Text content of the reply, unmodified.
    pub text: String,
}

/// Result of a successfully dispatched chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatOutcome {
    /// Reply text, returned to the caller verbatim.
    pub text: String,
    /// Assistant that produced the reply.
    pub assistant_id: AssistantId,
    /// Conversation the reply was generated in.
    pub conversation_id: ConversationId,
    /// True when the primary assistant failed and the fallback answered.
    pub used_fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_id_is_transparent_in_json() {
        let id = AssistantId::from("asst_123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"asst_123\"");
        let parsed: AssistantId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_assistant_id_is_empty() {
        assert!(AssistantId::from("").is_empty());
        assert!(AssistantId::from("   ").is_empty());
        assert!(!AssistantId::from("asst_1").is_empty());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(AssistantRole::Primary.to_string(), "primary");
        assert_eq!(AssistantRole::Fallback.to_string(), "fallback");
    }

    #[test]
    fn test_reply_without_message_id_omits_field() {
        let reply = AssistantReply {
            message_id: None,
            text: "hello".to_string(),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert!(json.get("message_id").is_none());
        assert_eq!(json["text"], "hello");
    }
}
