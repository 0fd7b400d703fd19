//! Business logic and client trait definitions for chatrelay.
//!
//! This crate defines the `AssistantClient` port that the infrastructure
//! layer implements, the in-memory session registry, and the chat dispatch
//! strategies. It depends only on `chatrelay-types` -- never on
//! `chatrelay-infra` or any HTTP crate.

pub mod assistant;
pub mod chat;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
