//! Keyboard shortcuts for the grid
//!
//! ```text
//! host key event → Keystroke → Keymap → Command → Vec<Msg>
//! ```
//!
//! Bindings come from the embedded `keymap.yaml` plus an optional user file
//! and may be gated on the session's `KeyContext`. `cmd` means Cmd on macOS
//! and Ctrl elsewhere. When a keystroke resolves to `KeyAction::Execute`
//! the session consumes it and the host must skip its own handling.

mod binding;
mod command;
mod config;
mod context;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError, Platform};
pub use context::{Condition, KeyContext};
pub use defaults::{default_bindings, get_default_keymap_yaml, load_default_keymap, merge_bindings};
pub use keymap::{KeyAction, Keymap};
pub use types::{KeyCode, Keystroke, Modifiers};

#[cfg(test)]
mod tests;
