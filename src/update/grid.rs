//! Grid store update functions
//!
//! Handles GridMsg edits from the grid widget. Every accepted change
//! installs a fresh snapshot and hands it to the grid consumer.

use crate::canonical::canonicalize_rows;
use crate::commands::Cmd;
use crate::messages::GridMsg;
use crate::model::{AppModel, CellPosition, Grid};

/// Handle grid widget messages
pub fn update_grid(model: &mut AppModel, msg: GridMsg) -> Option<Cmd> {
    let policy = model.config.rectangularity;

    let next = match msg {
        GridMsg::SetTitle { title } => model.grid.with_title(title),
        GridMsg::EditCell { row, column, value } => {
            let position = CellPosition::new(row, column);
            match model.grid.with_cell(position, value) {
                Some(grid) => grid,
                None => {
                    tracing::debug!(row, column, "ignoring edit outside the grid");
                    return None;
                }
            }
        }
        GridMsg::ReplaceRows { rows } => model.grid.with_rows(canonicalize_rows(&rows), policy),
        GridMsg::AddRow => model.grid.with_empty_row(),
        GridMsg::AddColumn => {
            if model.grid.row_count() == 0 {
                return None;
            }
            model.grid.with_empty_column()
        }
    };

    Some(install_grid(model, next))
}

/// Install a new grid snapshot and notify the grid consumer
pub(super) fn install_grid(model: &mut AppModel, grid: Grid) -> Cmd {
    tracing::trace!(
        rows = grid.row_count(),
        columns = grid.column_count(),
        "installing grid snapshot"
    );
    model.replace_grid(grid.clone());
    Cmd::EmitGrid(grid)
}
