//! Shipped bindings and user overrides
//!
//! `keymap.yaml` at the crate root is compiled in. `default_bindings` is the
//! same set in code, used if that file ever fails to parse.

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Shipped bindings with `~/.config/gridpilot/keymap.yaml` merged on top
pub fn load_default_keymap() -> Vec<Keybinding> {
    let shipped = parse_keymap_yaml(DEFAULT_KEYMAP_YAML).unwrap_or_else(|e| {
        tracing::warn!("embedded keymap rejected ({}), using built-in bindings", e);
        default_bindings()
    });

    let Some(path) = crate::config_paths::keymap_file().filter(|p| p.exists()) else {
        return shipped;
    };
    match load_keymap_file(&path) {
        Ok(user) => {
            tracing::info!("Merging {} user bindings from {}", user.len(), path.display());
            merge_bindings(shipped, user)
        }
        Err(e) => {
            tracing::warn!("Ignoring user keymap: {}", e);
            shipped
        }
    }
}

/// Apply user bindings on top of `base`, in order:
/// - `Unbound` drops every base binding on that keystroke
/// - a binding with the same keystroke and conditions replaces the base one
/// - anything else is added
pub fn merge_bindings(mut base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    for binding in user {
        if binding.command == Command::Unbound {
            base.retain(|b| b.keystroke != binding.keystroke);
        } else if let Some(i) = base
            .iter()
            .position(|b| b.keystroke == binding.keystroke && b.when == binding.when)
        {
            base[i] = binding;
        } else {
            base.push(binding);
        }
    }
    base
}

/// Built-in bindings for the current platform, mirroring `keymap.yaml`
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();
    let cmd_shift = cmd | Modifiers::SHIFT;

    let mut bindings = vec![
        bind(KeyCode::Char('k'), cmd, Command::AcceptSuggestion),
        bind(KeyCode::Escape, Modifiers::NONE, Command::ClearActiveCell)
            .when_single(Condition::CellActive),
        bind(KeyCode::Down, cmd_shift, Command::AddRow),
        bind(KeyCode::Right, cmd_shift, Command::AddColumn),
    ];

    // Accept answers to both Ctrl+K and Meta+K on every platform
    let other = if cmd == Modifiers::CTRL {
        Modifiers::META
    } else {
        Modifiers::CTRL
    };
    bindings.push(bind(KeyCode::Char('k'), other, Command::AcceptSuggestion));

    bindings
}

fn bind(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}
