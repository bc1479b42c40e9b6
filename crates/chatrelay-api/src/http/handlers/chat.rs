//! Chat endpoints.
//!
//! - `POST /api/chat/ask` -- one exchange, returns the stored record
//! - `GET /api/chat/history` -- every stored exchange, oldest first
//!
//! If the client disconnects mid-request the handler future is dropped,
//! which cancels the in-flight upstream call before anything is stored.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use chatrelay_types::exchange::ChatExchange;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for `POST /api/chat/ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Optional so a missing key becomes a validation error, not a 422.
    pub prompt: Option<String>,
}

/// POST /api/chat/ask
pub async fn ask(
    State(state): State<AppState>,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<ChatExchange>, AppError> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    let prompt = body
        .prompt
        .ok_or_else(|| AppError::Validation("prompt is required".to_string()))?;

    let exchange = state.chat_service.ask(&prompt).await?;
    Ok(Json(exchange))
}

/// GET /api/chat/history
pub async fn history(State(state): State<AppState>) -> Result<Json<Vec<ChatExchange>>, AppError> {
    let exchanges = state.chat_service.history().await?;
    Ok(Json(exchanges))
}
