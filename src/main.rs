use anyhow::Result;
use clap::Parser;

use gridpilot::cli::{CliArgs, CliCommand, OutputFormat};
use gridpilot::config::GridConfig;
use gridpilot::keymap::{default_bindings, Keymap};
use gridpilot::replay::{write_csv, write_json, ReplayScript};

fn main() -> Result<()> {
    gridpilot::tracing::init();

    let args = CliArgs::parse();
    match args.command {
        CliCommand::Replay {
            script,
            format,
            settle,
            no_user_config,
        } => {
            let (config, keymap) = if no_user_config {
                (
                    GridConfig::default(),
                    Keymap::with_bindings(default_bindings()),
                )
            } else {
                (GridConfig::load(), Keymap::load())
            };

            let outcome = ReplayScript::load(&script)?.run(config, keymap, settle)?;
            tracing::info!(
                emitted = outcome.emitted,
                requests = outcome.requests,
                intercepted = outcome.intercepted,
                "replay finished"
            );

            let stdout = std::io::stdout().lock();
            match format {
                OutputFormat::Csv => write_csv(&outcome.grid, stdout)?,
                OutputFormat::Json => write_json(&outcome.grid, stdout)?,
            }
        }
    }

    Ok(())
}
