//! Active-cell tracking
//!
//! At most one cell is focused at a time. Activating a new position replaces
//! the previous one; blurring the grid clears it.

use super::grid::{CellPosition, Grid};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveCell {
    position: Option<CellPosition>,
}

impl ActiveCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus a cell, replacing any previous position
    pub fn activate(&mut self, position: CellPosition) {
        self.position = Some(position);
    }

    /// Clear focus
    pub fn deactivate(&mut self) {
        self.position = None;
    }

    pub fn current(&self) -> Option<CellPosition> {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }

    /// Text of the focused cell in `grid`
    ///
    /// A cached position can point past the edge of a grid that has since
    /// shrunk; that reads as "no value".
    pub fn value_in<'a>(&self, grid: &'a Grid) -> Option<&'a str> {
        grid.value_at(self.position?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_replaces_position() {
        let mut active = ActiveCell::new();
        assert_eq!(active.current(), None);

        active.activate(CellPosition::new(0, 1));
        active.activate(CellPosition::new(2, 0));
        assert_eq!(active.current(), Some(CellPosition::new(2, 0)));

        active.deactivate();
        assert!(!active.is_active());
    }

    #[test]
    fn test_value_outside_grid_is_none() {
        let grid = Grid::from_strings("t", &[vec!["a", "b"]]);
        let mut active = ActiveCell::new();
        assert_eq!(active.value_in(&grid), None);

        active.activate(CellPosition::new(0, 1));
        assert_eq!(active.value_in(&grid), Some("b"));

        active.activate(CellPosition::new(3, 3));
        assert_eq!(active.value_in(&grid), None);
    }
}
