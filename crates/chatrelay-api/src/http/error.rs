//! Application error type mapping to HTTP status codes and the error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatrelay_types::error::{ChatError, CompletionError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors from the chat service.
    Chat(ChatError),
    /// Request could not be decoded.
    Validation(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    /// Status, machine-readable code and message for this error.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) | AppError::Chat(ChatError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Chat(ChatError::Upstream(e @ CompletionError::Timeout { .. })) => {
                (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT", e.to_string())
            }
            AppError::Chat(ChatError::Upstream(CompletionError::Status { status, .. })) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                format!("completion endpoint returned HTTP {status}"),
            ),
            AppError::Chat(ChatError::Upstream(e)) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", e.to_string())
            }
            AppError::Chat(ChatError::Storage(e)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if let AppError::Chat(ChatError::Upstream(CompletionError::Status { body, .. })) = &self {
            tracing::error!(code, %message, upstream_body = %body, "Request failed");
        } else if status.is_server_error() {
            tracing::error!(code, %message, "Request failed");
        }

        let body = json!({
            "errors": [{
                "code": code,
                "message": message,
            }],
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_types::error::RepositoryError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::Validation("bad json".to_string()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                ChatError::Validation("empty".to_string()).into(),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                ChatError::Upstream(CompletionError::Timeout { timeout_secs: 60 }).into(),
                StatusCode::GATEWAY_TIMEOUT,
                "UPSTREAM_TIMEOUT",
            ),
            (
                ChatError::Upstream(CompletionError::RateLimited).into(),
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
            ),
            (
                ChatError::Storage(RepositoryError::ResponseTooLong {
                    length: 4001,
                    max: 4000,
                })
                .into(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            let (got_status, got_code, _) = error.parts();
            assert_eq!(got_status, status);
            assert_eq!(got_code, code);
        }
    }

    #[test]
    fn test_upstream_status_body_stays_out_of_message() {
        let error: AppError = ChatError::Upstream(CompletionError::Status {
            status: 500,
            body: "internal trace: db password rejected".to_string(),
        })
        .into();

        let (status, code, message) = error.parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "UPSTREAM_ERROR");
        assert_eq!(message, "completion endpoint returned HTTP 500");
        assert!(!message.contains("password"));
    }
}
