//! TaskingAI assistant platform client.

pub mod client;
pub mod types;

pub use client::TaskingAiClient;
