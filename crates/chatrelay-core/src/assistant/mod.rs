//! Remote assistant platform abstractions.
//!
//! - `AssistantClient`: RPITIT trait for concrete platform clients
//! - `BoxAssistantClient`: object-safe wrapper for dynamic dispatch

pub mod box_client;
pub mod client;
