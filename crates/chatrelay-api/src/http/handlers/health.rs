//! GET /health

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// Liveness plus a snapshot of the dispatch configuration.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let service = &state.chat_service;
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "platform": service.client_name(),
        "strategy": service.strategy().to_string(),
        "fallback_enabled": service.strategy().is_fallback_enabled(),
        "active_sessions": service.sessions().len(),
    }))
}
