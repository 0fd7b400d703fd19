//! Per-user session tracking.
//!
//! Maps a user (optionally scoped to an assistant) to the id of the remote
//! conversation that user is talking in.

pub mod registry;
pub mod store;
