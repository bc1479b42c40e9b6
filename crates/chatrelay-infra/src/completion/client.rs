//! OpenAiChatClient -- concrete [`CompletionClient`] for chat completions endpoints.
//!
//! Sends the prompt as a single user message and returns the content of the
//! first choice. Each call is bounded by the configured timeout; nothing is
//! retried.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use chatrelay_core::completion::client::CompletionClient;
use chatrelay_types::config::{CompletionConfig, ProviderKind};
use chatrelay_types::error::CompletionError;

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Characters of a non-2xx response body kept in [`CompletionError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Chat completions client for Azure OpenAI and OpenAI-compatible APIs.
///
/// Does NOT derive Debug so the key can never end up in a log line.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    provider: ProviderKind,
    url: String,
    api_key: SecretString,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: u64,
}

impl OpenAiChatClient {
    /// Build a client from configuration.
    ///
    /// Fails with [`CompletionError::Configuration`] when the azure
    /// provider has no endpoint or deployment, or when the timeout is zero.
    pub fn from_config(
        config: &CompletionConfig,
        api_key: SecretString,
    ) -> Result<Self, CompletionError> {
        if config.timeout_secs == 0 {
            return Err(CompletionError::Configuration(
                "completion timeout_secs must be at least 1".to_string(),
            ));
        }
        let url = Self::completions_url(config)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            provider: config.provider,
            url,
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
        })
    }

    /// The resolved chat completions URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn completions_url(config: &CompletionConfig) -> Result<String, CompletionError> {
        match config.provider {
            ProviderKind::Azure => {
                let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                    CompletionError::Configuration("azure endpoint is not set".to_string())
                })?;
                let deployment = config.deployment.as_deref().ok_or_else(|| {
                    CompletionError::Configuration("azure deployment is not set".to_string())
                })?;
                Ok(format!(
                    "{}/openai/deployments/{}/chat/completions?api-version={}",
                    endpoint.trim_end_matches('/'),
                    deployment,
                    config.api_version
                ))
            }
            ProviderKind::OpenAi => {
                let base = config
                    .endpoint
                    .as_deref()
                    .unwrap_or(OPENAI_DEFAULT_BASE_URL);
                Ok(format!("{}/chat/completions", base.trim_end_matches('/')))
            }
        }
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ChatCompletionRequest<'a> {
        let model = match self.provider {
            ProviderKind::Azure => None,
            ProviderKind::OpenAi => Some(self.model.as_str()),
        };

        ChatCompletionRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    fn map_transport_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            CompletionError::Transport(e.to_string())
        }
    }
}

impl CompletionClient for OpenAiChatClient {
    fn name(&self) -> &str {
        match self.provider {
            ProviderKind::Azure => "azure",
            ProviderKind::OpenAi => "openai",
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = self.build_request(prompt);

        let request = self.client.post(&self.url).json(&body);
        let request = match self.provider {
            ProviderKind::Azure => request.header("api-key", self.api_key.expose_secret()),
            ProviderKind::OpenAi => request.bearer_auth(self.api_key.expose_secret()),
        };

        let response = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            return Err(match status.as_u16() {
                401 | 403 => CompletionError::AuthenticationFailed,
                429 => CompletionError::RateLimited,
                code => CompletionError::Status {
                    status: code,
                    body: error_body,
                },
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| CompletionError::MalformedResponse(format!("invalid JSON: {e}")))?;

        parsed.into_first_content().ok_or_else(|| {
            CompletionError::MalformedResponse("response has no message content".to_string())
        })
    }
}
