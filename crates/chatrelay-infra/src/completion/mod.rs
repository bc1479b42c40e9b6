//! HTTP chat-completion client.
//!
//! One [`client::OpenAiChatClient`] serves both Azure OpenAI deployments and
//! OpenAI-compatible endpoints; the flavors share request/response bodies
//! and differ only in URL layout and auth header.

pub mod client;
pub mod types;

use chatrelay_core::completion::box_client::BoxCompletionClient;
use chatrelay_core::completion::client::CompletionClient;
use chatrelay_types::config::CompletionConfig;
use chatrelay_types::error::CompletionError;

use crate::config::{api_key_var, resolve_api_key};

use self::client::OpenAiChatClient;

/// Build the configured completion client, reading the API key through `lookup`.
pub fn build_client<F>(
    config: &CompletionConfig,
    lookup: F,
) -> Result<BoxCompletionClient, CompletionError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = resolve_api_key(config.provider, lookup).ok_or_else(|| {
        CompletionError::Configuration(format!("{} is not set", api_key_var(config.provider)))
    })?;
    let client = OpenAiChatClient::from_config(config, api_key)?;
    tracing::debug!(provider = %config.provider, url = client.url(), "Completion client ready");
    Ok(BoxCompletionClient::new(client))
}

/// Stand-in used when no client could be built.
///
/// Lets read-only commands run without credentials; every `complete` call
/// fails with the original configuration problem.
pub struct UnavailableClient {
    reason: String,
}

impl UnavailableClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl CompletionClient for UnavailableClient {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        Err(CompletionError::Configuration(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_types::config::ProviderKind;

    #[test]
    fn test_build_client_requires_api_key() {
        let config = CompletionConfig {
            provider: ProviderKind::OpenAi,
            ..Default::default()
        };
        match build_client(&config, |_| None) {
            Err(CompletionError::Configuration(msg)) => assert!(msg.contains("OPENAI_API_KEY")),
            Err(other) => panic!("expected Configuration error, got {other:?}"),
            Ok(_) => panic!("expected Configuration error, got a client"),
        }
    }

    #[test]
    fn test_build_client_with_key() {
        let config = CompletionConfig {
            provider: ProviderKind::OpenAi,
            ..Default::default()
        };
        let client = build_client(&config, |k| (k == "OPENAI_API_KEY").then(|| "k".to_string()))
            .unwrap();
        assert_eq!(client.name(), "openai");
    }

    #[tokio::test]
    async fn test_unavailable_client_reports_reason() {
        let client = UnavailableClient::new("AZURE_OPENAI_API_KEY is not set");
        match client.complete("hi").await {
            Err(CompletionError::Configuration(msg)) => {
                assert_eq!(msg, "AZURE_OPENAI_API_KEY is not set")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
