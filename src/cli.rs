//! Command-line argument parsing
//!
//! ```text
//! gridpilot replay session.yaml            # final grid as CSV
//! gridpilot replay session.yaml -f json    # final grid as JSON
//! gridpilot replay session.yaml --settle   # await suggestions after every event
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Spreadsheet session driver with AI proposals and suggestions
#[derive(Parser, Debug)]
#[command(name = "gridpilot", version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Replay a scripted session and print the final grid
    Replay {
        /// YAML or JSON session script
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Output format for the final grid
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Wait for in-flight suggestions after every event
        #[arg(long)]
        settle: bool,

        /// Ignore ~/.config/gridpilot and use built-in defaults
        #[arg(long)]
        no_user_config: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}
