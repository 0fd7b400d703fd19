//! Infrastructure layer for chatrelay.
//!
//! Contains the implementation of the `AssistantClient` port defined in
//! `chatrelay-core` for the hosted TaskingAI platform, and the configuration
//! loader (TOML file, `.env`, environment variables).

pub mod config;
pub mod taskingai;
