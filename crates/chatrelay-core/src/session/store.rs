//! Session store abstraction and its in-memory implementation.
//!
//! `InMemorySessionStore` is backed by `DashMap`. Values are cloned on read
//! so no `DashMap` guard is ever held across an `.await` in the dispatch path.

use std::sync::Arc;

use dashmap::DashMap;

use chatrelay_types::assistant::{AssistantId, ConversationId};

/// Registry key: which user, optionally scoped to one assistant.
///
/// `assistant` is `None` when sessions are shared across assistants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub assistant: Option<AssistantId>,
    pub user_id: String,
}

impl SessionKey {
    pub fn scoped(assistant: &AssistantId, user_id: &str) -> Self {
        Self {
            assistant: Some(assistant.clone()),
            user_id: user_id.to_string(),
        }
    }

    pub fn shared(user_id: &str) -> Self {
        Self {
            assistant: None,
            user_id: user_id.to_string(),
        }
    }
}

/// Mapping from session key to remote conversation id.
///
/// Implementations must be safe to share between concurrent requests. There
/// is no eviction or expiry: entries live for the lifetime of the store.
pub trait SessionStore: Send + Sync {
    /// Cached conversation id for `key`, if any.
    fn get(&self, key: &SessionKey) -> Option<ConversationId>;

    /// Cache `conversation` under `key`, returning the id it replaced.
    fn insert(&self, key: SessionKey, conversation: ConversationId) -> Option<ConversationId>;

    /// Number of cached sessions.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime session store held in memory.
///
/// Cloning produces a shared view of the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    inner: Arc<DashMap<SessionKey, ConversationId>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &SessionKey) -> Option<ConversationId> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    fn insert(&self, key: SessionKey, conversation: ConversationId) -> Option<ConversationId> {
        self.inner.insert(key, conversation)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
