//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::model::{Grid, SuggestionRequest};

/// Commands returned by update functions
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the UI (focus, preview or suggestion panel changed)
    Redraw,
    /// Ask the suggestion supplier for a completion.
    /// Sends Msg::Suggestion(Resolved) when done.
    RequestSuggestion(SuggestionRequest),
    /// Hand the new grid to the grid consumer (render/persist)
    EmitGrid(Grid),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // Loading indicator appears
            Cmd::RequestSuggestion(_) => true,
            Cmd::EmitGrid(_) => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Combine an optional command with another, flattening `None`s
    pub fn and(first: Option<Cmd>, second: Option<Cmd>) -> Option<Cmd> {
        match (first, second) {
            (None, None) => None,
            (Some(cmd), None) | (None, Some(cmd)) => Some(cmd),
            (Some(Cmd::Batch(mut cmds)), Some(cmd)) => {
                cmds.push(cmd);
                Some(Cmd::Batch(cmds))
            }
            (Some(a), Some(b)) => Some(Cmd::Batch(vec![a, b])),
        }
    }

    /// Grid snapshots carried by this command, in order
    pub fn emitted_grids(&self) -> Vec<&Grid> {
        match self {
            Cmd::EmitGrid(grid) => vec![grid],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.emitted_grids()).collect(),
            _ => Vec::new(),
        }
    }

    /// Suggestion requests carried by this command, in order
    pub fn suggestion_requests(&self) -> Vec<&SuggestionRequest> {
        match self {
            Cmd::RequestSuggestion(request) => vec![request],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.suggestion_requests()).collect(),
            _ => Vec::new(),
        }
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}
