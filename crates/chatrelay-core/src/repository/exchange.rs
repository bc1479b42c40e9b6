//! ExchangeRepository trait definition.
//!
//! Append-only storage for chat exchanges. There is no update or delete.

use chatrelay_types::error::RepositoryError;
use chatrelay_types::exchange::{ChatExchange, NewExchange};

/// Repository trait for chat exchange persistence.
///
/// Implementations live in chatrelay-infra (e.g., `SqliteExchangeRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ExchangeRepository: Send + Sync {
    /// Persist an exchange, assigning its id and `chat_time`.
    ///
    /// Must reject an `ai_response` over the character cap with
    /// [`RepositoryError::ResponseTooLong`] instead of truncating it.
    fn save(
        &self,
        exchange: NewExchange,
    ) -> impl std::future::Future<Output = Result<ChatExchange, RepositoryError>> + Send;

    /// Every stored exchange, in insertion order.
    fn find_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatExchange>, RepositoryError>> + Send;

    /// Number of stored exchanges.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
