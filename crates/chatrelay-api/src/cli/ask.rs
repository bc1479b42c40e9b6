//! `chatrelay ask` -- one exchange from the terminal.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::state::AppState;

/// Send `prompt`, store the exchange, print it.
pub async fn ask(state: &AppState, prompt: &str, json: bool, quiet: bool) -> Result<()> {
    state.require_completion()?;

    let spinner = (!json && !quiet).then(|| {
        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(spinner_style);
        }
        spinner.set_message("Waiting for completion...");
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner
    });

    let result = state.chat_service.ask(prompt).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let exchange = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&exchange)?);
        return Ok(());
    }

    if quiet {
        println!("{}", exchange.ai_response);
        return Ok(());
    }

    println!();
    println!("{}", exchange.ai_response);
    println!();
    println!(
        "  {} {}",
        style(format!("#{}", exchange.id)).dim(),
        style(exchange.chat_time.format("%Y-%m-%d %H:%M:%S UTC")).dim()
    );
    println!();

    Ok(())
}
