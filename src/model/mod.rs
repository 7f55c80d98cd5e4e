//! Application model - the complete state of the grid session
//!
//! This module contains all the state types following the Elm Architecture pattern.
//! The model is only ever mutated by `crate::update::update`.

pub mod active_cell;
pub mod grid;
pub mod proposal;
pub mod suggestion;

pub use active_cell::ActiveCell;
pub use grid::{Cell, CellPosition, Grid, Rectangularity, Row};
pub use proposal::{
    ChangeProposal, CommitAction, ProposalId, ProposalLabels, ProposalStatus, ProposalSupply,
    Proposals,
};
pub use suggestion::{
    build_instructions, RequestContext, SuggestionContext, SuggestionCycle, SuggestionRequest,
    SuggestionState,
};

use crate::config::GridConfig;
use crate::keymap::KeyContext;

/// The complete application model
#[derive(Debug, Clone)]
pub struct AppModel {
    /// Accepted grid state (single source of truth)
    pub grid: Grid,
    /// Focused cell, if any
    pub active: ActiveCell,
    /// Replace/append proposals from the assistant
    pub proposals: Proposals,
    /// Inline auto-completion state
    pub suggestion: SuggestionCycle,
    /// User configuration
    pub config: GridConfig,
}

impl AppModel {
    pub fn new(grid: Grid, config: GridConfig) -> Self {
        let grid = grid.with_rows(grid.rows.clone(), config.rectangularity);
        Self {
            grid,
            active: ActiveCell::new(),
            proposals: Proposals::new(),
            suggestion: SuggestionCycle::new(),
            config,
        }
    }

    /// Model with an empty grid titled `title`
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(Grid::new(title, Vec::new()), GridConfig::default())
    }

    /// Value of the focused cell, `None` if nothing is focused or the
    /// position fell off the grid
    pub fn active_value(&self) -> Option<&str> {
        self.active.value_in(&self.grid)
    }

    /// Current request context, `None` when suggestions are gated off
    pub fn request_context(&self) -> Option<RequestContext> {
        RequestContext::capture(&self.grid, &self.active)
    }

    /// Install a new grid snapshot
    pub fn replace_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// Context for evaluating conditional keybindings
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            cell_active: self.active.is_active(),
            suggestion_available: self.suggestion.is_available(),
        }
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::empty("Untitled")
    }
}
