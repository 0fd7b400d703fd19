//! HTTP layer: the `/chat` endpoint, health check and static index page.

pub mod error;
pub mod handlers;
pub mod router;
