//! Keyboard input routing
//!
//! Keystrokes resolve through the keymap against the session's current
//! `KeyContext`. A keystroke the keymap claims is consumed: the host must
//! not run its own default handling for it, even when the resulting
//! messages turn out to be no-ops (accepting with no suggestion ready).

use crate::keymap::{KeyAction, Keymap, Keystroke};
use crate::messages::Msg;
use crate::model::AppModel;

/// Messages for a keystroke, or `None` when the keystroke passes through
pub fn keystroke_to_msgs(
    keymap: &Keymap,
    model: &AppModel,
    keystroke: Keystroke,
) -> Option<Vec<Msg>> {
    let context = model.key_context();
    match keymap.handle_keystroke_with_context(keystroke, Some(&context)) {
        KeyAction::Execute(command) => {
            tracing::debug!(
                key = %keystroke,
                command = command.display_name(),
                "keystroke intercepted"
            );
            Some(command.to_msgs())
        }
        KeyAction::NoMatch => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{default_bindings, KeyCode, Modifiers};
    use crate::messages::{FocusMsg, SuggestionMsg};
    use crate::model::CellPosition;

    #[test]
    fn test_cmd_k_intercepted_without_suggestion() {
        let keymap = Keymap::with_bindings(default_bindings());
        let model = AppModel::empty("t");
        let msgs = keystroke_to_msgs(
            &keymap,
            &model,
            Keystroke::new(KeyCode::Char('k'), Modifiers::cmd()),
        )
        .unwrap();
        assert!(matches!(msgs[..], [Msg::Suggestion(SuggestionMsg::Accept)]));
    }

    #[test]
    fn test_escape_depends_on_focus() {
        let keymap = Keymap::with_bindings(default_bindings());
        let mut model = AppModel::empty("t");
        let escape = Keystroke::key(KeyCode::Escape);

        assert!(keystroke_to_msgs(&keymap, &model, escape).is_none());

        model.active.activate(CellPosition::new(0, 0));
        let msgs = keystroke_to_msgs(&keymap, &model, escape).unwrap();
        assert!(matches!(msgs[..], [Msg::Focus(FocusMsg::Blur)]));
    }
}
