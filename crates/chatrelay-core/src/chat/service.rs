//! Chat service orchestrating a single exchange.
//!
//! ChatService coordinates the CompletionClient and the ExchangeRepository:
//! validate the prompt, obtain a completion, persist the pair, return the
//! stored record. It holds no state of its own between calls.

use chatrelay_types::error::ChatError;
use chatrelay_types::exchange::{ChatExchange, NewExchange};
use tracing::{debug, info, warn};

use crate::completion::client::CompletionClient;
use crate::repository::exchange::ExchangeRepository;

/// Orchestrates prompt → completion → stored exchange.
///
/// Generic over `ExchangeRepository` and `CompletionClient`; both are
/// injected through [`ChatService::new`].
pub struct ChatService<R: ExchangeRepository, C: CompletionClient> {
    repo: R,
    client: C,
}

impl<R: ExchangeRepository, C: CompletionClient> ChatService<R, C> {
    /// Create a new chat service from a store and a completion client.
    pub fn new(repo: R, client: C) -> Self {
        Self { repo, client }
    }

    /// Access the exchange repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Access the completion client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run one exchange.
    ///
    /// An empty or whitespace-only prompt is rejected before anything is sent
    /// upstream. A completion failure writes nothing. A storage failure after
    /// a successful completion discards the completion.
    pub async fn ask(&self, prompt: &str) -> Result<ChatExchange, ChatError> {
        if prompt.trim().is_empty() {
            return Err(ChatError::Validation("prompt must not be empty".to_string()));
        }

        debug!(
            client = self.client.name(),
            prompt_chars = prompt.chars().count(),
            "Requesting completion"
        );

        let completion = match self.client.complete(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(client = self.client.name(), error = %e, "Completion failed");
                return Err(e.into());
            }
        };

        let response_chars = completion.chars().count();
        let exchange = match self.repo.save(NewExchange::new(prompt, completion)).await {
            Ok(exchange) => exchange,
            Err(e) => {
                warn!(
                    error = %e,
                    response_chars,
                    "Failed to store exchange; completion discarded"
                );
                return Err(e.into());
            }
        };

        info!(id = exchange.id, response_chars, "Exchange stored");
        Ok(exchange)
    }

    /// Every stored exchange, oldest first.
    pub async fn history(&self) -> Result<Vec<ChatExchange>, ChatError> {
        Ok(self.repo.find_all().await?)
    }

    /// Number of stored exchanges.
    pub async fn exchange_count(&self) -> Result<u64, ChatError> {
        Ok(self.repo.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use chatrelay_types::error::{CompletionError, RepositoryError};
    use chrono::Utc;

    // --- Mocks ---

    /// In-memory store with sequential ids.
    #[derive(Default)]
    struct MockRepository {
        rows: Mutex<Vec<ChatExchange>>,
        fail_writes: bool,
    }

    impl MockRepository {
        fn failing() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                fail_writes: true,
            }
        }
    }

    impl ExchangeRepository for MockRepository {
        async fn save(&self, exchange: NewExchange) -> Result<ChatExchange, RepositoryError> {
            if self.fail_writes {
                return Err(RepositoryError::Connection);
            }
            exchange.check_response_len()?;
            let mut rows = self.rows.lock().unwrap();
            let id = rows.len() as i64 + 1;
            let stored = exchange.into_exchange(id, Utc::now());
            rows.push(stored.clone());
            Ok(stored)
        }

        async fn find_all(&self) -> Result<Vec<ChatExchange>, RepositoryError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn count(&self) -> Result<u64, RepositoryError> {
            Ok(self.rows.lock().unwrap().len() as u64)
        }
    }

    /// Client that returns a fixed reply (or a fixed failure) and counts calls.
    struct StubClient {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl StubClient {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CompletionClient for StubClient {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(CompletionError::Status {
                    status: 500,
                    body: "boom".to_string(),
                }),
            }
        }
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_ask_stores_and_returns_exchange() {
        let service = ChatService::new(MockRepository::default(), StubClient::replying("4"));

        let exchange = service.ask("What is 2+2?").await.unwrap();
        assert_eq!(exchange.user_input, "What is 2+2?");
        assert_eq!(exchange.ai_response, "4");
        assert_eq!(exchange.id, 1);

        let history = service.history().await.unwrap();
        assert_eq!(history, vec![exchange]);
    }

    #[tokio::test]
    async fn test_ask_assigns_fresh_ids() {
        let service = ChatService::new(MockRepository::default(), StubClient::replying("ok"));

        let first = service.ask("one").await.unwrap();
        let second = service.ask("two").await.unwrap();
        let third = service.ask("one").await.unwrap();

        assert!(first.id < second.id && second.id < third.id);
        assert_eq!(service.exchange_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_history_contains_every_ask_in_order() {
        let service = ChatService::new(MockRepository::default(), StubClient::replying("r"));

        let mut created = Vec::new();
        for i in 0..5 {
            created.push(service.ask(&format!("prompt {i}")).await.unwrap());
        }

        let history = service.history().await.unwrap();
        assert_eq!(history.len(), 5);
        assert_eq!(history, created);
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected_without_upstream_call() {
        let service = ChatService::new(MockRepository::default(), StubClient::replying("4"));

        for prompt in ["", "   ", "\n\t"] {
            let err = service.ask(prompt).await.unwrap_err();
            assert!(matches!(err, ChatError::Validation(_)), "prompt {prompt:?}");
        }

        assert_eq!(service.client().calls(), 0);
        assert!(service.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_writes_nothing() {
        let service = ChatService::new(MockRepository::default(), StubClient::failing());

        let err = service.ask("will fail").await.unwrap_err();
        assert!(matches!(
            err,
            ChatError::Upstream(CompletionError::Status { status: 500, .. })
        ));
        assert_eq!(service.client().calls(), 1);
        assert!(
            !service
                .history()
                .await
                .unwrap()
                .iter()
                .any(|e| e.user_input == "will fail")
        );
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let service = ChatService::new(MockRepository::failing(), StubClient::replying("lost"));

        let err = service.ask("hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Storage(RepositoryError::Connection)));
        assert_eq!(service.client().calls(), 1);
    }

    #[tokio::test]
    async fn test_oversized_completion_is_rejected() {
        let long = "x".repeat(chatrelay_types::exchange::MAX_RESPONSE_CHARS + 1);
        let service = ChatService::new(MockRepository::default(), StubClient::replying(&long));

        let err = service.ask("write a lot").await.unwrap_err();
        assert!(matches!(
            err,
            ChatError::Storage(RepositoryError::ResponseTooLong { .. })
        ));
        assert_eq!(service.exchange_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_prompt_is_stored_verbatim() {
        let service = ChatService::new(MockRepository::default(), StubClient::replying("ok"));

        let prompt = "  keep my whitespace\n";
        let exchange = service.ask(prompt).await.unwrap();
        assert_eq!(exchange.user_input, prompt);
    }
}
