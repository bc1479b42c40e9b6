//! Configuration loader for chatrelay.
//!
//! Reads `config.toml` from the data directory (`~/.chatrelay/` by default)
//! and deserializes it into [`RelayConfig`], then applies environment
//! overrides. Falls back to defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use chatrelay_types::config::{ProviderKind, RelayConfig};

use crate::sqlite::pool::default_database_url;

/// Resolve the data directory.
///
/// `CHATRELAY_DATA_DIR` wins; otherwise `~/.chatrelay`; as a last resort
/// `.chatrelay` in the working directory.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHATRELAY_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatrelay");
    }

    PathBuf::from(".chatrelay")
}

/// Load configuration from `{data_dir}/config.toml` and the process environment.
pub async fn load_config(data_dir: &Path) -> RelayConfig {
    let mut config = load_config_file(data_dir).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    if config.database_url.is_none() {
        config.database_url = Some(default_database_url(data_dir));
    }
    config
}

/// Parse `{data_dir}/config.toml` without looking at the environment.
///
/// - Missing file: [`RelayConfig::default()`].
/// - Unreadable or unparseable file: logs a warning and returns the default.
pub async fn load_config_file(data_dir: &Path) -> RelayConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return RelayConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return RelayConfig::default();
        }
    };

    match toml::from_str::<RelayConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            RelayConfig::default()
        }
    }
}

/// Apply environment overrides through `lookup`.
///
/// The provider is resolved first so the endpoint variable matches it
/// (`AZURE_OPENAI_ENDPOINT` for azure, `OPENAI_BASE_URL` for openai).
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("CHATRELAY_DATABASE_URL") {
        config.database_url = Some(url);
    }

    if let Some(provider) = lookup("CHATRELAY_PROVIDER") {
        match provider.parse::<ProviderKind>() {
            Ok(kind) => config.completion.provider = kind,
            Err(e) => tracing::warn!("Ignoring CHATRELAY_PROVIDER: {e}"),
        }
    }

    let completion = &mut config.completion;
    match completion.provider {
        ProviderKind::Azure => {
            if let Some(endpoint) = lookup("AZURE_OPENAI_ENDPOINT") {
                completion.endpoint = Some(endpoint);
            }
            if let Some(deployment) = lookup("AZURE_OPENAI_DEPLOYMENT") {
                completion.deployment = Some(deployment);
            }
            if let Some(version) = lookup("AZURE_OPENAI_API_VERSION") {
                completion.api_version = version;
            }
        }
        ProviderKind::OpenAi => {
            if let Some(base_url) = lookup("OPENAI_BASE_URL") {
                completion.endpoint = Some(base_url);
            }
            if let Some(model) = lookup("OPENAI_MODEL") {
                completion.model = model;
            }
        }
    }
}

/// Environment variable that holds the API key for `provider`.
pub fn api_key_var(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::Azure => "AZURE_OPENAI_API_KEY",
        ProviderKind::OpenAi => "OPENAI_API_KEY",
    }
}

/// Read the API key for `provider` through `lookup`. Empty values count as unset.
pub fn resolve_api_key<F>(provider: ProviderKind, lookup: F) -> Option<SecretString>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(api_key_var(provider))
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}
