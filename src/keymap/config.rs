//! Keymap files
//!
//! ```yaml
//! bindings:
//!   - key: "cmd+k"
//!     command: AcceptSuggestion
//!   - key: "meta+k"
//!     command: AcceptSuggestion
//!     platform: [linux, windows]
//!   - key: "escape"
//!     command: ClearActiveCell
//!     when: [cell_active]
//! ```
//!
//! Keys use the notation parsed by `Keystroke::from_str`; commands and
//! conditions are deserialized by name.

use std::path::Path;

use serde::Deserialize;

use super::binding::Keybinding;
use super::command::Command;
use super::context::Condition;
use super::types::Keystroke;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeymapFile {
    bindings: Vec<BindingEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BindingEntry {
    key: Keystroke,
    command: Command,
    #[serde(default)]
    platform: Option<PlatformFilter>,
    #[serde(default)]
    when: Option<Vec<Condition>>,
}

impl BindingEntry {
    fn applies_to(&self, platform: Platform) -> bool {
        self.platform
            .as_ref()
            .map_or(true, |filter| filter.includes(platform))
    }

    fn into_binding(self) -> Keybinding {
        let binding = Keybinding::new(self.key, self.command);
        match self.when {
            Some(conditions) if !conditions.is_empty() => binding.when(conditions),
            _ => binding,
        }
    }
}

/// Operating system a binding can be restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Macos,
    Linux,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Macos
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }
}

/// `platform: macos` or `platform: [linux, windows]`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlatformFilter {
    One(Platform),
    Any(Vec<Platform>),
}

impl PlatformFilter {
    fn includes(&self, platform: Platform) -> bool {
        match self {
            PlatformFilter::One(only) => *only == platform,
            PlatformFilter::Any(list) => list.contains(&platform),
        }
    }
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| KeymapError::IoError(format!("{}: {}", path.display(), e)))?;
    parse_keymap_yaml(&content)
}

/// Parse keybindings from YAML, keeping those for the current platform
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let file: KeymapFile =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;
    let platform = Platform::current();
    Ok(file
        .bindings
        .into_iter()
        .filter(|entry| entry.applies_to(platform))
        .map(BindingEntry::into_binding)
        .collect())
}

/// Parse a single key such as `"cmd+shift+down"`
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    key_str.parse()
}

/// Errors that can occur when loading keymaps
#[derive(Debug, Clone)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "Failed to read keymap: {}", e),
            KeymapError::ParseError(e) => write!(f, "Failed to parse keymap: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
        }
    }
}

impl std::error::Error for KeymapError {}
