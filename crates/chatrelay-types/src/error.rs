use thiserror::Error;

/// Errors from the remote completion call.
///
/// None of these are retried; they propagate unchanged to the caller.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(String),

    #[error("completion request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("completion endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion endpoint rejected the credentials")]
    AuthenticationFailed,

    #[error("completion endpoint rate limited the request")]
    RateLimited,

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("completion client misconfigured: {0}")]
    Configuration(String),
}

/// Errors from repository operations (used by trait definitions in chatrelay-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("response is {length} characters, limit is {max}")]
    ResponseTooLong { length: usize, max: usize },
}

/// Errors surfaced by the chat service.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("upstream error: {0}")]
    Upstream(#[from] CompletionError),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_error_display() {
        let err = CompletionError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "completion endpoint returned HTTP 503: unavailable"
        );
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::ResponseTooLong {
            length: 4001,
            max: 4000,
        };
        assert_eq!(err.to_string(), "response is 4001 characters, limit is 4000");
    }

    #[test]
    fn test_chat_error_from_conversions() {
        let err: ChatError = CompletionError::RateLimited.into();
        assert!(matches!(err, ChatError::Upstream(CompletionError::RateLimited)));

        let err: ChatError = RepositoryError::Connection.into();
        assert!(matches!(err, ChatError::Storage(RepositoryError::Connection)));
        assert_eq!(err.to_string(), "storage error: database connection error");
    }
}
