//! `chatrelay history` -- table of stored exchanges.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use super::truncate_display;
use crate::state::AppState;

/// List every stored exchange, oldest first.
pub async fn history(state: &AppState, json: bool) -> Result<()> {
    let exchanges = state.chat_service.history().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&exchanges)?);
        return Ok(());
    }

    if exchanges.is_empty() {
        println!();
        println!(
            "  {} No exchanges yet. Start one with: {}",
            style("i").blue().bold(),
            style("chatrelay ask \"...\"").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Time").fg(Color::White),
        Cell::new("Prompt").fg(Color::White),
        Cell::new("Response").fg(Color::White),
    ]);

    for exchange in &exchanges {
        table.add_row(vec![
            Cell::new(exchange.id).fg(Color::DarkGrey),
            Cell::new(exchange.chat_time.format("%Y-%m-%d %H:%M:%S").to_string())
                .fg(Color::DarkGrey),
            Cell::new(truncate_display(&exchange.user_input, 40)).fg(Color::Cyan),
            Cell::new(truncate_display(&exchange.ai_response, 60)),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} exchange{}",
        style(exchanges.len()).bold(),
        if exchanges.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
