//! Logging setup and the state diff used by traced updates
//!
//! Console output goes to stderr (replay output on stdout stays
//! machine-readable) filtered by `RUST_LOG`, default `warn`:
//! - `RUST_LOG=gridpilot::update=debug` - state transitions
//! - `RUST_LOG=gridpilot::update=trace` - plus a before/after diff per message
//! - `RUST_LOG=gridpilot::runtime=debug` - suggestion workers
//!
//! A debug-level copy is kept in `~/.config/gridpilot/logs/`, rotated daily.

use ::tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::AppModel;

const LOG_FILE_PREFIX: &str = "gridpilot.log";

/// Install the global subscriber. Call once, early in `main`.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer())
        .init();
}

/// Daily-rotated debug log, or `None` when the log directory is unusable
fn file_layer<S>() -> Option<impl Layer<S>>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let logs_dir = match crate::config_paths::ensure_logs_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("gridpilot: file logging disabled: {}", e);
            return None;
        }
    };
    let layer = fmt::layer()
        .with_writer(tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX))
        .with_ansi(false)
        .with_line_number(true)
        .with_filter(EnvFilter::new("debug"));
    Some(layer)
}

/// Lightweight snapshot of session state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub title: String,
    pub rows: usize,
    pub columns: usize,
    pub active: Option<(usize, usize)>,
    pub suggestion: &'static str,
    pub generation: u64,
    pub pending_proposals: usize,
}

impl GridSnapshot {
    pub fn from_model(model: &AppModel) -> Self {
        Self {
            title: model.grid.title.clone(),
            rows: model.grid.row_count(),
            columns: model.grid.column_count(),
            active: model.active.current().map(|p| (p.row, p.column)),
            suggestion: model.suggestion.state().name(),
            generation: model.suggestion.generation(),
            pending_proposals: model.proposals.pending().count(),
        }
    }

    /// Human-readable list of what changed, `None` if nothing did
    pub fn diff(&self, other: &GridSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        let mut note = |changed: bool, what: &str, before: String, after: String| {
            if changed {
                changes.push(format!("{}: {} → {}", what, before, after));
            }
        };

        note(
            self.title != other.title,
            "title",
            format!("{:?}", self.title),
            format!("{:?}", other.title),
        );
        note(
            (self.rows, self.columns) != (other.rows, other.columns),
            "shape",
            format!("{}x{}", self.rows, self.columns),
            format!("{}x{}", other.rows, other.columns),
        );
        note(
            self.active != other.active,
            "active",
            format!("{:?}", self.active),
            format!("{:?}", other.active),
        );
        note(
            self.suggestion != other.suggestion,
            "suggestion",
            self.suggestion.to_string(),
            other.suggestion.to_string(),
        );
        note(
            self.generation != other.generation,
            "generation",
            self.generation.to_string(),
            other.generation.to_string(),
        );
        note(
            self.pending_proposals != other.pending_proposals,
            "pending proposals",
            self.pending_proposals.to_string(),
            other.pending_proposals.to_string(),
        );

        (!changes.is_empty()).then(|| changes.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellPosition, Grid};

    #[test]
    fn test_identical_snapshots_have_no_diff() {
        let model = AppModel::empty("t");
        let snap = GridSnapshot::from_model(&model);
        assert_eq!(snap.diff(&snap.clone()), None);
    }

    #[test]
    fn test_diff_reports_shape_and_focus() {
        let mut model = AppModel::empty("t");
        let before = GridSnapshot::from_model(&model);

        model.grid = Grid::from_strings("t", &[vec!["a", "b"]]);
        model.active.activate(CellPosition::new(0, 1));
        let after = GridSnapshot::from_model(&model);

        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("shape: 0x0 → 1x2"));
        assert!(diff.contains("active: None → Some((0, 1))"));
    }
}
