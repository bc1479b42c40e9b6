//! HTTP/REST API layer for chatrelay.
//!
//! Axum-based API at `/api/chat/` with permissive CORS. No authentication.

pub mod error;
pub mod handlers;
pub mod router;
