//! Chat dispatch: the one-shot procedure and the single/fallback strategies.

pub mod service;
pub mod strategy;
