//! Suggestion update handlers
//!
//! Handles supplier results and the accept shortcut, and keeps the
//! suggestion cycle in step with the request context after every message.

use crate::commands::Cmd;
use crate::messages::SuggestionMsg;
use crate::model::AppModel;

use super::grid::install_grid;

/// Handle suggestion messages
pub fn update_suggestion(model: &mut AppModel, msg: SuggestionMsg) -> Option<Cmd> {
    match msg {
        SuggestionMsg::Resolved { generation, result } => {
            if model.suggestion.resolve(generation, result) {
                Some(Cmd::Redraw)
            } else {
                None
            }
        }

        SuggestionMsg::Accept => {
            let Some(rows) = model.suggestion.take_available() else {
                tracing::debug!(
                    state = model.suggestion.state().name(),
                    "accept ignored, no suggestion available"
                );
                return None;
            };
            let next = model.grid.with_rows(rows, model.config.rectangularity);
            tracing::info!("Applied suggestion ({} rows)", next.row_count());
            Some(install_grid(model, next))
        }
    }
}

/// Re-sync the suggestion cycle with the current request context
///
/// Call after any state change. Returns a `Cmd::RequestSuggestion` when the
/// context key changed while suggestions are enabled.
pub fn sync_suggestions(model: &mut AppModel) -> Option<Cmd> {
    let next = model.request_context();
    let request = model.suggestion.sync(next, &model.config.instructions)?;
    Some(Cmd::RequestSuggestion(request))
}
