//! Axum router configuration with middleware.
//!
//! Chat routes are under `/api/chat/`; `/health` sits at the root.
//! Middleware: permissive CORS, request tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let chat_routes = Router::new()
        .route("/ask", post(handlers::chat::ask))
        .route("/history", get(handlers::chat::history));

    Router::new()
        .nest("/api/chat", chat_routes)
        .route("/health", get(handlers::health::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
