//! Scripted session replay
//!
//! A replay script describes an initial grid, the answers the suggestion
//! supplier will give, and a list of events. Scripts are YAML (or JSON,
//! which YAML accepts):
//!
//! ```yaml
//! title: Budget
//! rows:
//!   - [Item, Cost]
//!   - [Rent, ""]
//! responses:
//!   - payload:
//!       rows:
//!         - cells: [{value: Item}, {value: Cost}]
//!         - cells: [{value: Rent}, {value: "1200"}]
//! events:
//!   - focus: {type: activate, row: 1, column: 1}
//!   - settle
//!   - key: "cmd+k"
//! ```

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::config::GridConfig;
use crate::keymap::{Keymap, Keystroke};
use crate::messages::{FocusMsg, GridMsg, Msg, ProposalMsg};
use crate::model::{AppModel, Grid};
use crate::runtime::{ScriptedProvider, ScriptedResponse, Session};

/// One step of a replay
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayEvent {
    Grid(GridMsg),
    Focus(FocusMsg),
    Proposal(ProposalMsg),
    /// A keystroke in keymap notation, e.g. `"cmd+k"`
    Key(String),
    /// Accept the available suggestion without going through the keymap
    AcceptSuggestion,
    /// Wait for every in-flight suggestion request
    Settle,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    #[serde(default = "default_title")]
    pub title: String,
    /// Initial rows in any shape the canonicalizer accepts
    #[serde(default)]
    pub rows: Value,
    /// Overrides the user's config file when present
    #[serde(default)]
    pub config: Option<GridConfig>,
    #[serde(default)]
    pub responses: Vec<ScriptedResponse>,
    #[serde(default)]
    pub events: Vec<ReplayEvent>,
}

fn default_title() -> String {
    "Untitled".to_string()
}

/// What a replay produced
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub grid: Grid,
    /// Number of grids handed to the outbound consumer
    pub emitted: usize,
    /// Number of suggestion requests the provider saw
    pub requests: usize,
    /// Keystrokes the keymap consumed
    pub intercepted: usize,
}

impl ReplayScript {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).context("invalid replay script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_yaml_str(&source).with_context(|| format!("in {}", path.display()))
    }

    /// Run the script to completion
    ///
    /// With `settle_each`, in-flight suggestions are awaited after every
    /// event; otherwise only after explicit `settle` events and at the end.
    pub fn run(
        self,
        config: GridConfig,
        keymap: Keymap,
        settle_each: bool,
    ) -> Result<ReplayOutcome> {
        let config = self.config.unwrap_or(config);
        let model = AppModel::new(Grid::from_raw(self.title, &self.rows), config);
        let provider = Arc::new(ScriptedProvider::new(self.responses));

        let emitted = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&emitted);
        let mut session = Session::new(model, keymap, provider.clone())
            .with_consumer(move |grid: &Grid| {
                tracing::debug!(rows = grid.row_count(), "grid emitted");
                counter.fetch_add(1, Ordering::Relaxed);
            });

        let mut intercepted = 0;
        for (index, event) in self.events.into_iter().enumerate() {
            tracing::debug!(index, ?event, "replay event");
            match event {
                ReplayEvent::Grid(msg) => {
                    session.dispatch(Msg::Grid(msg));
                }
                ReplayEvent::Focus(msg) => {
                    session.dispatch(Msg::Focus(msg));
                }
                ReplayEvent::Proposal(msg) => {
                    session.dispatch(Msg::Proposal(msg));
                }
                ReplayEvent::Key(key) => {
                    let keystroke: Keystroke = key
                        .parse()
                        .map_err(|e| anyhow::anyhow!("event {}: {}", index, e))?;
                    if session.handle_keystroke(keystroke) {
                        intercepted += 1;
                    }
                }
                ReplayEvent::AcceptSuggestion => {
                    session.dispatch(Msg::accept_suggestion());
                }
                ReplayEvent::Settle => {
                    settle(&mut session)?;
                }
            }
            if settle_each {
                settle(&mut session)?;
            } else {
                session.pump();
            }
        }
        settle(&mut session)?;

        Ok(ReplayOutcome {
            grid: session.grid().clone(),
            emitted: emitted.load(Ordering::Relaxed),
            requests: provider.requests().len(),
            intercepted,
        })
    }
}

fn settle(session: &mut Session) -> Result<()> {
    if session.settle() {
        Ok(())
    } else {
        anyhow::bail!("{} suggestion request(s) never resolved", session.in_flight())
    }
}

/// Write the grid's rows as CSV, one record per row
pub fn write_csv<W: Write>(grid: &Grid, writer: W) -> Result<()> {
    let mut out = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    for row in &grid.rows {
        out.write_record(row.iter().map(|cell| cell.value.as_str()))?;
    }
    out.flush()?;
    Ok(())
}

/// Write the grid as pretty-printed JSON
pub fn write_json<W: Write>(grid: &Grid, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, grid)?;
    writeln!(writer)?;
    Ok(())
}
