//! Command enum representing every bindable grid action
//!
//! Commands are the bridge between keybindings and the message system.
//! Each command maps to zero or more `Msg` values for the update loop.

use serde::Deserialize;

use crate::messages::{FocusMsg, GridMsg, Msg, SuggestionMsg};

/// All grid commands that can be bound to keys
///
/// Keymap files name them exactly as the variants are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Command {
    /// Apply the current suggestion, if one is available
    AcceptSuggestion,
    /// Drop focus from the active cell
    ClearActiveCell,
    /// Append an empty row
    AddRow,
    /// Append an empty column
    AddColumn,
    /// Explicitly unbound - disables a default binding
    Unbound,
}

impl Command {
    /// Convert this command to message(s) for the update loop
    pub fn to_msgs(self) -> Vec<Msg> {
        match self {
            Command::AcceptSuggestion => vec![Msg::Suggestion(SuggestionMsg::Accept)],
            Command::ClearActiveCell => vec![Msg::Focus(FocusMsg::Blur)],
            Command::AddRow => vec![Msg::Grid(GridMsg::AddRow)],
            Command::AddColumn => vec![Msg::Grid(GridMsg::AddColumn)],
            Command::Unbound => vec![],
        }
    }

    /// Get a display name for this command
    pub fn display_name(self) -> &'static str {
        match self {
            Command::AcceptSuggestion => "Accept Suggestion",
            Command::ClearActiveCell => "Clear Active Cell",
            Command::AddRow => "Add Row",
            Command::AddColumn => "Add Column",
            Command::Unbound => "Unbound",
        }
    }
}
