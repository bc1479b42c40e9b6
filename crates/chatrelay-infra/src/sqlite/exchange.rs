//! SQLite exchange repository implementation.
//!
//! Implements `ExchangeRepository` from `chatrelay-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, explicit mapping in
//! both directions.

use chatrelay_core::repository::exchange::ExchangeRepository;
use chatrelay_types::error::RepositoryError;
use chatrelay_types::exchange::{ChatExchange, NewExchange};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ExchangeRepository`.
pub struct SqliteExchangeRepository {
    pool: DatabasePool,
}

impl SqliteExchangeRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ChatExchangeRow {
    id: i64,
    user_input: String,
    ai_response: String,
    chat_time: String,
}

impl ChatExchangeRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_input: row.try_get("user_input")?,
            ai_response: row.try_get("ai_response")?,
            chat_time: row.try_get("chat_time")?,
        })
    }

    fn into_exchange(self) -> Result<ChatExchange, RepositoryError> {
        Ok(ChatExchange {
            id: self.id,
            user_input: self.user_input,
            ai_response: self.ai_response,
            chat_time: parse_datetime(&self.chat_time)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width nanosecond RFC 3339, so lexical order matches time order.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// ExchangeRepository implementation
// ---------------------------------------------------------------------------

impl ExchangeRepository for SqliteExchangeRepository {
    async fn save(&self, exchange: NewExchange) -> Result<ChatExchange, RepositoryError> {
        exchange.check_response_len()?;

        let chat_time = Utc::now();
        let result = sqlx::query(
            "INSERT INTO chat_exchanges (user_input, ai_response, chat_time) VALUES (?, ?, ?)",
        )
        .bind(&exchange.user_input)
        .bind(&exchange.ai_response)
        .bind(format_datetime(&chat_time))
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, "Inserted chat exchange");

        Ok(exchange.into_exchange(id, chat_time))
    }

    async fn find_all(&self) -> Result<Vec<ChatExchange>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, user_input, ai_response, chat_time FROM chat_exchanges ORDER BY id ASC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        let mut exchanges = Vec::with_capacity(rows.len());
        for row in &rows {
            let exchange_row =
                ChatExchangeRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            exchanges.push(exchange_row.into_exchange()?);
        }

        Ok(exchanges)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM chat_exchanges")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(count as u64)
    }
}
