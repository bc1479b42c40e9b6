//! CLI command definitions for the `chatrelay` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod history;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Relay prompts to a hosted model and keep a log of every exchange.
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to server.port in config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to server.host in config.toml).
        #[arg(long)]
        host: Option<String>,

        /// Also export spans through OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Send one prompt and store the exchange.
    Ask {
        /// The prompt to send.
        prompt: String,
    },

    /// List every stored exchange.
    #[command(alias = "ls")]
    History,

    /// Show configuration and store status.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Shorten `text` to at most `max` characters for table display.
pub fn truncate_display(text: &str, max: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() > max {
        let head: String = single_line.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        single_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::parse_from(["chatrelay", "-vv", "serve", "--port", "9000", "--otel"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Serve { port, host, otel } => {
                assert_eq!(port, Some(9000));
                assert!(host.is_none());
                assert!(otel);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_ask_with_json() {
        let cli = Cli::parse_from(["chatrelay", "ask", "What is 2+2?", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Ask { ref prompt } if prompt == "What is 2+2?"));
    }

    #[test]
    fn test_truncate_display() {
        assert_eq!(truncate_display("short", 10), "short");
        assert_eq!(truncate_display("line one\nline two", 40), "line one line two");
        assert_eq!(truncate_display("abcdefghijkl", 8), "abcde...");
        // Multi-byte characters are never split
        assert_eq!(truncate_display("ééééééééé", 6), "ééé...");
    }
}
