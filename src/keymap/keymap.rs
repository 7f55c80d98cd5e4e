//! Keystroke to command resolution

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::context::KeyContext;
use super::types::Keystroke;

/// Result of handling a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Execute this command; the host's default handling is suppressed
    Execute(Command),
    /// No binding matches this keystroke
    NoMatch,
}

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Indices into `bindings`. Several bindings may share a keystroke
    /// with different conditions.
    lookup: HashMap<Keystroke, Vec<usize>>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keymap with the given bindings
    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    /// Keymap built from the embedded defaults plus user overrides
    pub fn load() -> Self {
        Self::with_bindings(super::defaults::load_default_keymap())
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        let idx = self.bindings.len();
        self.lookup.entry(binding.keystroke).or_default().push(idx);
        self.bindings.push(binding);
    }

    /// What the host should do with a keystroke. `Unbound` resolves to
    /// `NoMatch` so the host keeps its default handling.
    pub fn handle_keystroke_with_context(
        &self,
        keystroke: Keystroke,
        context: Option<&KeyContext>,
    ) -> KeyAction {
        match self.lookup_with_context(&keystroke, context) {
            Some(Command::Unbound) | None => KeyAction::NoMatch,
            Some(command) => KeyAction::Execute(command),
        }
    }

    /// Look up a keystroke ignoring conditional bindings
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<Command> {
        self.lookup_with_context(keystroke, None)
    }

    /// Resolve a keystroke. A conditional binding whose conditions hold
    /// beats any unconditional one; otherwise the first unconditional
    /// binding wins. Without a context only unconditional bindings count.
    pub fn lookup_with_context(
        &self,
        keystroke: &Keystroke,
        context: Option<&KeyContext>,
    ) -> Option<Command> {
        let mut fallback = None;
        for binding in self.lookup.get(keystroke)?.iter().map(|&i| &self.bindings[i]) {
            if !binding.is_conditional() {
                fallback = fallback.or(Some(binding.command));
            } else if context.is_some_and(|ctx| binding.conditions_hold(ctx)) {
                return Some(binding.command);
            }
        }
        fallback
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// Get the keybinding for a command (first match)
    pub fn binding_for(&self, command: Command) -> Option<&Keybinding> {
        self.bindings.iter().find(|b| b.command == command)
    }

    /// Shortcut label for a command's keybinding
    pub fn display_for(&self, command: Command) -> Option<String> {
        self.binding_for(command).map(|b| b.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::context::Condition;
    use crate::keymap::types::{KeyCode, Modifiers};

    fn ctrl_k() -> Keystroke {
        Keystroke::new(KeyCode::Char('k'), Modifiers::CTRL)
    }

    fn escape() -> Keystroke {
        Keystroke::key(KeyCode::Escape)
    }

    #[test]
    fn test_single_binding_lookup() {
        let keymap =
            Keymap::with_bindings(vec![Keybinding::new(ctrl_k(), Command::AcceptSuggestion)]);

        assert_eq!(keymap.lookup(&ctrl_k()), Some(Command::AcceptSuggestion));
        assert_eq!(keymap.lookup(&escape()), None);
    }

    #[test]
    fn test_conditional_binding_needs_context() {
        let keymap = Keymap::with_bindings(vec![Keybinding::new(
            escape(),
            Command::ClearActiveCell,
        )
        .when_single(Condition::CellActive)]);

        assert_eq!(keymap.lookup(&escape()), None);

        let idle = KeyContext::default();
        assert_eq!(
            keymap.handle_keystroke_with_context(escape(), Some(&idle)),
            KeyAction::NoMatch
        );

        let focused = KeyContext {
            cell_active: true,
            ..KeyContext::default()
        };
        assert_eq!(
            keymap.handle_keystroke_with_context(escape(), Some(&focused)),
            KeyAction::Execute(Command::ClearActiveCell)
        );
    }

    #[test]
    fn test_conditional_wins_over_unconditional() {
        let keymap = Keymap::with_bindings(vec![
            Keybinding::new(ctrl_k(), Command::AddRow),
            Keybinding::new(ctrl_k(), Command::AcceptSuggestion)
                .when_single(Condition::SuggestionAvailable),
        ]);
        let ready = KeyContext {
            suggestion_available: true,
            ..KeyContext::default()
        };

        assert_eq!(
            keymap.lookup_with_context(&ctrl_k(), Some(&ready)),
            Some(Command::AcceptSuggestion)
        );
        assert_eq!(
            keymap.lookup_with_context(&ctrl_k(), Some(&KeyContext::default())),
            Some(Command::AddRow)
        );
    }

    #[test]
    fn test_unbound_is_no_match() {
        let keymap = Keymap::with_bindings(vec![Keybinding::new(ctrl_k(), Command::Unbound)]);
        assert_eq!(
            keymap.handle_keystroke_with_context(ctrl_k(), None),
            KeyAction::NoMatch
        );
    }

    #[test]
    fn test_display_for_command() {
        let keymap =
            Keymap::with_bindings(vec![Keybinding::new(ctrl_k(), Command::AcceptSuggestion)]);

        let display = keymap.display_for(Command::AcceptSuggestion).unwrap();
        assert!(display.contains('K'));
        assert_eq!(keymap.display_for(Command::AddRow), None);
    }
}
