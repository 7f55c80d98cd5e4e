//! App-level update functions (configuration)

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::{AppModel, Rectangularity};

use super::grid::install_grid;

/// Handle app messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::ConfigReloaded(config) => {
            model.config = *config;
            tracing::info!(
                rectangularity = ?model.config.rectangularity,
                "configuration reloaded"
            );

            // Switching to whole-grid mode may leave ragged rows behind
            if model.config.rectangularity == Rectangularity::WholeGrid
                && !model.grid.is_rectangular()
            {
                let next = model
                    .grid
                    .with_rows(model.grid.rows.clone(), Rectangularity::WholeGrid);
                return Some(install_grid(model, next));
            }
            Some(Cmd::Redraw)
        }
    }
}
