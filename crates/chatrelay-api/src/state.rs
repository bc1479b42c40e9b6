//! Application state wiring the chat service together.
//!
//! AppState holds the concrete service used by both CLI and REST API.
//! `ChatService` is generic over its store and client; AppState pins it to
//! the SQLite repository and a type-erased completion client.

use std::path::PathBuf;
use std::sync::Arc;

use chatrelay_core::chat::service::ChatService;
use chatrelay_core::completion::box_client::BoxCompletionClient;
use chatrelay_infra::completion::{build_client, UnavailableClient};
use chatrelay_infra::config::load_config;
use chatrelay_infra::sqlite::exchange::SqliteExchangeRepository;
use chatrelay_infra::sqlite::pool::{default_database_url, DatabasePool};
use chatrelay_types::config::RelayConfig;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteExchangeRepository, BoxCompletionClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<RelayConfig>,
    pub data_dir: PathBuf,
    /// Why no completion client could be built, if that happened.
    pub completion_unavailable: Option<String>,
}

impl AppState {
    /// Initialize the application state in `data_dir`: load config, connect to DB, wire the service.
    ///
    /// A missing API key does not fail initialization so that read-only
    /// commands keep working; see [`AppState::require_completion`].
    pub async fn init(data_dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let db_url = config
            .database_url
            .clone()
            .unwrap_or_else(|| default_database_url(&data_dir));
        let db_pool = DatabasePool::new(&db_url).await?;

        let (client, completion_unavailable) =
            match build_client(&config.completion, |key| std::env::var(key).ok()) {
                Ok(client) => (client, None),
                Err(e) => {
                    tracing::debug!(error = %e, "Completion client unavailable");
                    let reason = e.to_string();
                    (
                        BoxCompletionClient::new(UnavailableClient::new(reason.clone())),
                        Some(reason),
                    )
                }
            };

        let chat_service = ChatService::new(SqliteExchangeRepository::new(db_pool), client);

        Ok(Self::new(chat_service, config, data_dir, completion_unavailable))
    }

    /// Assemble state from already-built parts.
    pub fn new(
        chat_service: ConcreteChatService,
        config: RelayConfig,
        data_dir: PathBuf,
        completion_unavailable: Option<String>,
    ) -> Self {
        Self {
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
            data_dir,
            completion_unavailable,
        }
    }

    /// Fail when commands that call the model are run without a usable client.
    pub fn require_completion(&self) -> anyhow::Result<()> {
        match &self.completion_unavailable {
            Some(reason) => anyhow::bail!("completion endpoint is not configured: {reason}"),
            None => Ok(()),
        }
    }
}
