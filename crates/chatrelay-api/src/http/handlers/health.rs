//! GET /health

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::http::error::AppError;
use crate::state::AppState;

/// Liveness plus a store round trip; fails if the database is unreachable.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let exchanges = state.chat_service.exchange_count().await?;
    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "exchanges": exchanges,
        "completion_configured": state.completion_unavailable.is_none(),
    })))
}
