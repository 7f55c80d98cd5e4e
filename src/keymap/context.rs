//! Session state that conditional bindings are checked against

use serde::Deserialize;

/// Snapshot of the session taken for each keystroke, see
/// `AppModel::key_context`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    pub cell_active: bool,
    pub suggestion_available: bool,
}

/// A `when:` entry in a keymap file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Escape only blurs while a cell has focus
    CellActive,
    NoCellActive,
    SuggestionAvailable,
}

impl Condition {
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::CellActive => ctx.cell_active,
            Condition::NoCellActive => !ctx.cell_active,
            Condition::SuggestionAvailable => ctx.suggestion_available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_conditions_are_complementary() {
        for cell_active in [false, true] {
            let ctx = KeyContext {
                cell_active,
                ..KeyContext::default()
            };
            assert_eq!(Condition::CellActive.evaluate(&ctx), cell_active);
            assert_eq!(Condition::NoCellActive.evaluate(&ctx), !cell_active);
        }
    }

    #[test]
    fn test_condition_names() {
        let parsed: Vec<Condition> =
            serde_yaml::from_str("[cell_active, no_cell_active, suggestion_available]").unwrap();
        assert_eq!(
            parsed,
            vec![
                Condition::CellActive,
                Condition::NoCellActive,
                Condition::SuggestionAvailable
            ]
        );
    }
}
