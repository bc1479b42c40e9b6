//! Chat exchange types.
//!
//! An exchange is one prompt/response pair. [`NewExchange`] is what the
//! service hands to the store; [`ChatExchange`] is what the store hands
//! back once it has assigned an id and a timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RepositoryError;

/// Upper bound on `ai_response`, counted in Unicode scalar values.
///
/// Mirrors the `CHECK` constraint on `chat_exchanges.ai_response`.
pub const MAX_RESPONSE_CHARS: usize = 4000;

/// A persisted prompt/response pair.
///
/// `id` and `chat_time` are assigned by the store exactly once and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatExchange {
    pub id: i64,
    pub user_input: String,
    pub ai_response: String,
    pub chat_time: DateTime<Utc>,
}

/// An exchange that has not been stored yet (no id, no timestamp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExchange {
    pub user_input: String,
    pub ai_response: String,
}

impl NewExchange {
    pub fn new(user_input: impl Into<String>, ai_response: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            ai_response: ai_response.into(),
        }
    }

    /// Reject responses longer than [`MAX_RESPONSE_CHARS`].
    ///
    /// Oversized responses are never truncated.
    pub fn check_response_len(&self) -> Result<(), RepositoryError> {
        let length = self.ai_response.chars().count();
        if length > MAX_RESPONSE_CHARS {
            return Err(RepositoryError::ResponseTooLong {
                length,
                max: MAX_RESPONSE_CHARS,
            });
        }
        Ok(())
    }

    /// Attach the store-assigned identity, producing the persisted form.
    pub fn into_exchange(self, id: i64, chat_time: DateTime<Utc>) -> ChatExchange {
        ChatExchange {
            id,
            user_input: self.user_input,
            ai_response: self.ai_response,
            chat_time,
        }
    }
}
