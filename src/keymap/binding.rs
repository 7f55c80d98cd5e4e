//! One keystroke bound to one grid command

use super::command::Command;
use super::context::{Condition, KeyContext};
use super::types::Keystroke;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    pub command: Command,
    /// All must hold for the binding to fire; `None` fires everywhere
    pub when: Option<Vec<Condition>>,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self {
            keystroke,
            command,
            when: None,
        }
    }

    pub fn when(mut self, conditions: Vec<Condition>) -> Self {
        self.when = Some(conditions);
        self
    }

    pub fn when_single(self, condition: Condition) -> Self {
        self.when(vec![condition])
    }

    pub fn is_conditional(&self) -> bool {
        self.when.is_some()
    }

    /// Whether this conditional binding's conditions all hold in `ctx`.
    /// Always `false` for unconditional bindings.
    pub fn conditions_hold(&self, ctx: &KeyContext) -> bool {
        self.when
            .as_deref()
            .is_some_and(|conditions| conditions.iter().all(|c| c.evaluate(ctx)))
    }

    pub fn label(&self) -> String {
        self.keystroke.label()
    }
}
