//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use serde::Deserialize;
use serde_json::Value;

use crate::model::{CellPosition, CommitAction, ProposalId, ProposalSupply};

/// Grid store edits coming from the grid widget
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridMsg {
    /// Title input changed
    SetTitle { title: String },
    /// A single cell was edited
    EditCell {
        row: usize,
        column: usize,
        value: String,
    },
    /// Widget reported new data wholesale (untrusted shape)
    ReplaceRows { rows: Value },
    /// "+" below the grid: add a row of empty cells
    AddRow,
    /// "+" beside the grid: add an empty column
    AddColumn,
}

/// Focus changes reported by the grid widget
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FocusMsg {
    /// A cell became active
    Activate { row: usize, column: usize },
    /// The grid lost focus
    Blur,
}

impl FocusMsg {
    pub fn position(&self) -> Option<CellPosition> {
        match self {
            FocusMsg::Activate { row, column } => Some(CellPosition::new(*row, *column)),
            FocusMsg::Blur => None,
        }
    }
}

/// Proposal supplier deliveries and user decisions
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProposalMsg {
    /// A (possibly partial) proposal delivery; repeated ids update the candidate
    Received {
        id: ProposalId,
        action: CommitAction,
        rows: Value,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        status: ProposalSupply,
    },
    /// User pressed the accept control
    Accept { id: ProposalId },
    /// User dismissed the proposal
    Reject { id: ProposalId },
}

/// Suggestion cycle messages
#[derive(Debug, Clone)]
pub enum SuggestionMsg {
    /// Supplier finished a request for `generation`
    Resolved {
        generation: u64,
        result: Result<Option<Value>, String>,
    },
    /// Apply the available suggestion (Cmd+K)
    Accept,
}

/// Application-level messages
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Configuration was reloaded
    ConfigReloaded(Box<crate::config::GridConfig>),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Grid store edits
    Grid(GridMsg),
    /// Active-cell tracking
    Focus(FocusMsg),
    /// Replace/append proposals
    Proposal(ProposalMsg),
    /// Inline suggestions
    Suggestion(SuggestionMsg),
    /// App messages (configuration)
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    /// Focus a cell
    pub fn activate(row: usize, column: usize) -> Self {
        Msg::Focus(FocusMsg::Activate { row, column })
    }

    /// Clear focus
    pub fn blur() -> Self {
        Msg::Focus(FocusMsg::Blur)
    }

    /// Edit one cell
    pub fn edit_cell(row: usize, column: usize, value: impl Into<String>) -> Self {
        Msg::Grid(GridMsg::EditCell {
            row,
            column,
            value: value.into(),
        })
    }

    /// Deliver a proposal
    pub fn proposal(
        id: impl Into<String>,
        action: CommitAction,
        rows: Value,
        status: ProposalSupply,
    ) -> Self {
        Msg::Proposal(ProposalMsg::Received {
            id: ProposalId::new(id),
            action,
            rows,
            title: None,
            status,
        })
    }

    /// Accept a proposal
    pub fn accept_proposal(id: impl Into<String>) -> Self {
        Msg::Proposal(ProposalMsg::Accept {
            id: ProposalId::new(id),
        })
    }

    /// Supplier result for a suggestion request
    pub fn suggestion_resolved(generation: u64, result: Result<Option<Value>, String>) -> Self {
        Msg::Suggestion(SuggestionMsg::Resolved { generation, result })
    }

    /// Accept the available suggestion
    pub fn accept_suggestion() -> Self {
        Msg::Suggestion(SuggestionMsg::Accept)
    }
}
