//! gridpilot - spreadsheet session core with AI proposals and suggestions
//!
//! The grid, the focused cell, staged proposals and the inline suggestion
//! cycle live in one `AppModel` that only changes through
//! `update::update`, Elm style. `runtime::Session` drives the loop against
//! a suggestion provider and an outbound grid consumer.

pub mod canonical;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod replay;
pub mod runtime;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::GridConfig;
pub use messages::Msg;
pub use model::{AppModel, Grid};
pub use runtime::Session;
