//! Keystrokes and the `mods+key` notation used in keymap files

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::config::KeymapError;

/// Held modifier keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

/// Per flag: name in keymap notation, macOS glyph, label elsewhere.
/// Listed in the order labels are rendered.
const MODIFIER_NAMES: [(Modifiers, &str, &str, &str); 4] = [
    (Modifiers::CTRL, "ctrl", "⌃", "Ctrl+"),
    (Modifiers::ALT, "alt", "⌥", "Alt+"),
    (Modifiers::SHIFT, "shift", "⇧", "Shift+"),
    (Modifiers::META, "meta", "⌘", "Super+"),
];

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(1);
    pub const SHIFT: Modifiers = Modifiers(1 << 1);
    pub const ALT: Modifiers = Modifiers(1 << 2);
    /// Cmd on macOS, Super/Win elsewhere
    pub const META: Modifiers = Modifiers(1 << 3);

    /// Whether every flag in `flags` is held
    pub const fn has(self, flags: Modifiers) -> bool {
        self.0 & flags.0 == flags.0
    }

    pub const fn ctrl(self) -> bool {
        self.has(Self::CTRL)
    }

    pub const fn shift(self) -> bool {
        self.has(Self::SHIFT)
    }

    pub const fn alt(self) -> bool {
        self.has(Self::ALT)
    }

    pub const fn meta(self) -> bool {
        self.has(Self::META)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The grid shortcut modifier: Cmd on macOS, Ctrl elsewhere
    pub const fn cmd() -> Modifiers {
        if cfg!(target_os = "macos") {
            Self::META
        } else {
            Self::CTRL
        }
    }

    pub const fn has_cmd(self) -> bool {
        self.has(Self::cmd())
    }

    fn from_name(name: &str) -> Option<Modifiers> {
        match name {
            "cmd" => Some(Self::cmd()),
            "ctrl" => Some(Self::CTRL),
            "shift" => Some(Self::SHIFT),
            "alt" | "option" => Some(Self::ALT),
            "meta" | "super" => Some(Self::META),
            _ => None,
        }
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Keys a grid binding can use
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key, stored lowercase
    Char(char),
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
}

impl KeyCode {
    const NAMED: [(KeyCode, &'static str, &'static str); 6] = [
        (KeyCode::Enter, "enter", "Enter"),
        (KeyCode::Escape, "escape", "Esc"),
        (KeyCode::Up, "up", "Up"),
        (KeyCode::Down, "down", "Down"),
        (KeyCode::Left, "left", "Left"),
        (KeyCode::Right, "right", "Right"),
    ];

    fn from_name(name: &str) -> Option<KeyCode> {
        if let [c] = name.chars().collect::<Vec<_>>()[..] {
            return Some(KeyCode::Char(c.to_ascii_lowercase()));
        }
        let name = if name == "esc" { "escape" } else { name };
        Self::NAMED
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(key, _, _)| *key)
    }

    fn named(self) -> Option<(&'static str, &'static str)> {
        Self::NAMED
            .iter()
            .find(|(key, _, _)| *key == self)
            .map(|(_, name, label)| (*name, *label))
    }
}

/// A single keystroke: a key with modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// Unmodified keystroke
    pub const fn key(key: KeyCode) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Unmodified character keystroke, normalized to lowercase
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c.to_ascii_lowercase()))
    }

    /// Label for tooltips next to the accept control: `⌘K` on macOS,
    /// `Ctrl+K` elsewhere
    pub fn label(&self) -> String {
        let mut out = String::new();
        for (flag, _, glyph, text) in MODIFIER_NAMES {
            if self.mods.has(flag) {
                out.push_str(if cfg!(target_os = "macos") { glyph } else { text });
            }
        }
        match (self.key, self.key.named()) {
            (KeyCode::Char(c), _) => out.extend(c.to_uppercase()),
            (_, Some((_, label))) => out.push_str(label),
            (_, None) => {}
        }
        out
    }
}

/// Writes keymap notation, e.g. `ctrl+shift+down`, which parses back to
/// the same keystroke
impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name, _, _) in MODIFIER_NAMES {
            if self.mods.has(flag) {
                write!(f, "{}+", name)?;
            }
        }
        match (self.key, self.key.named()) {
            (KeyCode::Char(c), _) => write!(f, "{}", c),
            (_, Some((name, _))) => f.write_str(name),
            (_, None) => Ok(()),
        }
    }
}

impl FromStr for Keystroke {
    type Err = KeymapError;

    /// Parse keymap notation: `+`-separated modifier names ending in a key,
    /// e.g. `"cmd+shift+down"`. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let notation = s.trim().to_ascii_lowercase();
        let (mod_names, key_name) = match notation.rsplit_once('+') {
            Some((mods, key)) => (Some(mods), key),
            None => (None, notation.as_str()),
        };

        let key = KeyCode::from_name(key_name)
            .ok_or_else(|| KeymapError::InvalidKey(format!("{}: unknown key {:?}", s, key_name)))?;

        let mut mods = Modifiers::NONE;
        for name in mod_names.into_iter().flat_map(|m| m.split('+')) {
            mods |= Modifiers::from_name(name).ok_or_else(|| {
                KeymapError::InvalidKey(format!("{}: unknown modifier {:?}", s, name))
            })?;
        }
        Ok(Keystroke::new(key, mods))
    }
}

impl<'de> Deserialize<'de> for Keystroke {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let notation = String::deserialize(deserializer)?;
        notation.parse().map_err(serde::de::Error::custom)
    }
}
