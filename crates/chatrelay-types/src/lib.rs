//! Shared domain types for chatrelay.
//!
//! Identifiers for assistants and remote conversations, reply and outcome
//! shapes, configuration, and the error enums used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, thiserror, secrecy.

pub mod assistant;
pub mod config;
pub mod error;
