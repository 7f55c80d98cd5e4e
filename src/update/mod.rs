//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. After every
//! message the suggestion cycle is re-synced against the new request
//! context, which may add a `Cmd::RequestSuggestion` to the result.

mod app;
mod focus;
mod grid;
mod proposal;
mod suggestion;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::GridSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, trace, Level};

pub use app::update_app;
pub use focus::update_focus;
pub use grid::update_grid;
pub use proposal::update_proposal;
pub use suggestion::{sync_suggestions, update_suggestion};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let result = match msg {
        Msg::Grid(m) => grid::update_grid(model, m),
        Msg::Focus(m) => focus::update_focus(model, m),
        Msg::Proposal(m) => proposal::update_proposal(model, m),
        Msg::Suggestion(m) => suggestion::update_suggestion(model, m),
        Msg::App(m) => app::update_app(model, m),
    };

    Cmd::and(result, sync_suggestions(model))
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after model state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = GridSnapshot::from_model(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = GridSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        trace!(target: "grid", %diff, "state changed");
    }

    model
        .grid
        .assert_invariants_with_context(&msg_name, model.config.rectangularity);

    result
}

/// Get a display name for a message type
///
/// Payload-heavy variants are abbreviated so row data does not flood logs.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::{GridMsg, ProposalMsg, SuggestionMsg};

    match msg {
        Msg::Grid(GridMsg::ReplaceRows { rows }) => format!(
            "Grid::ReplaceRows({} rows)",
            rows.get("rows")
                .unwrap_or(rows)
                .as_array()
                .map_or(0, Vec::len)
        ),
        Msg::Grid(m) => format!("Grid::{:?}", m),
        Msg::Focus(m) => format!("Focus::{:?}", m),
        Msg::Proposal(ProposalMsg::Received { id, status, .. }) => {
            format!("Proposal::Received({}, {:?})", id, status)
        }
        Msg::Proposal(m) => format!("Proposal::{:?}", m),
        Msg::Suggestion(SuggestionMsg::Resolved { generation, result }) => format!(
            "Suggestion::Resolved({}, {})",
            generation,
            if result.is_ok() { "ok" } else { "err" }
        ),
        Msg::Suggestion(m) => format!("Suggestion::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
