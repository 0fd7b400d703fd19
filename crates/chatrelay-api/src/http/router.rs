//! Axum router configuration with middleware.
//!
//! Routes: `POST /chat`, `GET /health`, `GET /` (index page) and
//! `/static/*` assets. Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let index = ServeFile::new(state.static_dir.join("index.html"));
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/health", get(handlers::health::health_check))
        .route_service("/", index)
        .nest_service("/static", assets)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
