//! Dispatch strategy selection.
//!
//! Chosen once at startup from the `use_fallback` flag and fixed for the
//! lifetime of the process.

use std::fmt;

use chatrelay_types::assistant::AssistantId;

/// Routing policy for a user's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchStrategy {
    /// Only the primary assistant is tried.
    Single { primary: AssistantId },
    /// The fallback assistant is tried when the primary fails.
    WithFallback {
        primary: AssistantId,
        fallback: AssistantId,
    },
}

impl DispatchStrategy {
    /// Build the strategy from the configuration flag.
    ///
    /// The fallback id is ignored when `use_fallback` is false. Blank ids are
    /// accepted: they fail at the remote call like any other bad id.
    pub fn from_flag(use_fallback: bool, primary: AssistantId, fallback: AssistantId) -> Self {
        if use_fallback {
            DispatchStrategy::WithFallback { primary, fallback }
        } else {
            DispatchStrategy::Single { primary }
        }
    }

    pub fn primary(&self) -> &AssistantId {
        match self {
            DispatchStrategy::Single { primary } => primary,
            DispatchStrategy::WithFallback { primary, .. } => primary,
        }
    }

    pub fn fallback(&self) -> Option<&AssistantId> {
        match self {
            DispatchStrategy::Single { .. } => None,
            DispatchStrategy::WithFallback { fallback, .. } => Some(fallback),
        }
    }

    pub fn is_fallback_enabled(&self) -> bool {
        matches!(self, DispatchStrategy::WithFallback { .. })
    }
}

impl fmt::Display for DispatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchStrategy::Single { .. } => write!(f, "single"),
            DispatchStrategy::WithFallback { .. } => write!(f, "with_fallback"),
        }
    }
}
