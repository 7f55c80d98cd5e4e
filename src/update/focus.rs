//! Active-cell update functions

use crate::commands::Cmd;
use crate::messages::FocusMsg;
use crate::model::AppModel;

/// Handle focus messages from the grid widget
pub fn update_focus(model: &mut AppModel, msg: FocusMsg) -> Option<Cmd> {
    let next = msg.position();
    if model.active.current() == next {
        return None;
    }

    match next {
        Some(position) => model.active.activate(position),
        None => model.active.deactivate(),
    }
    tracing::debug!(active = ?next, "active cell changed");
    Some(Cmd::Redraw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellPosition;

    #[test]
    fn test_activate_then_blur() {
        let mut model = AppModel::default();
        let cmd = update_focus(&mut model, FocusMsg::Activate { row: 1, column: 2 });
        assert!(matches!(cmd, Some(Cmd::Redraw)));
        assert_eq!(model.active.current(), Some(CellPosition::new(1, 2)));

        update_focus(&mut model, FocusMsg::Blur);
        assert_eq!(model.active.current(), None);
    }

    #[test]
    fn test_same_position_is_noop() {
        let mut model = AppModel::default();
        update_focus(&mut model, FocusMsg::Activate { row: 0, column: 0 });
        assert!(update_focus(&mut model, FocusMsg::Activate { row: 0, column: 0 }).is_none());
        update_focus(&mut model, FocusMsg::Blur);
        assert!(update_focus(&mut model, FocusMsg::Blur).is_none());
    }
}
