//! System status command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Show where data lives, which provider is configured, and how many
/// exchanges are stored.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let count = state.chat_service.exchange_count().await?;
    let completion = &state.config.completion;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "database_url": state.config.database_url,
            "provider": completion.provider.to_string(),
            "endpoint": completion.endpoint,
            "deployment": completion.deployment,
            "timeout_secs": completion.timeout_secs,
            "completion_configured": state.completion_unavailable.is_none(),
            "exchanges": count,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} chatrelay v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Storage ──").dim());
    println!("  Data dir:  {}", state.data_dir.display());
    if let Some(url) = &state.config.database_url {
        println!("  Database:  {url}");
    }
    println!("  Exchanges: {}", style(count).bold());
    println!();

    println!("  {}", style("── Completion ──").dim());
    println!("  Provider:  {}", style(completion.provider).cyan());
    if let Some(endpoint) = &completion.endpoint {
        println!("  Endpoint:  {endpoint}");
    }
    if let Some(deployment) = &completion.deployment {
        println!("  Deployment: {deployment}");
    }
    println!("  Timeout:   {}s", completion.timeout_secs);
    match &state.completion_unavailable {
        None => println!("  Ready:     {}", style("✓").green()),
        Some(reason) => println!("  Ready:     {} {}", style("✗").red(), style(reason).dim()),
    }
    println!();

    Ok(())
}
