//! Grid store types: cells, rows, positions and the grid snapshot
//!
//! A `Grid` is an immutable snapshot. Every mutation goes through one of the
//! `with_*` constructors, which build a new value and leave the old one
//! untouched.

use serde::{Deserialize, Serialize};

use crate::canonical::{canonicalize_rows, pad_rows};

/// A single spreadsheet cell. The value is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub value: String,
}

impl Cell {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Empty padding cell
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the value is empty after trimming whitespace
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::new(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::new(value)
    }
}

/// An ordered sequence of cells
pub type Row = Vec<Cell>;

/// How strictly the grid store enforces equal row widths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rectangularity {
    /// Pad every row to the widest row after each mutation
    #[default]
    WholeGrid,
    /// Only canonicalize each incoming batch; existing rows are left alone
    PerBatch,
}

/// Position of a cell in the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: usize,
    pub column: usize,
}

impl CellPosition {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// The accepted state of the spreadsheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub title: String,
    pub rows: Vec<Row>,
}

impl Grid {
    /// Create a grid, padding rows to a common width
    pub fn new(title: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            title: title.into(),
            rows: pad_rows(rows),
        }
    }

    /// Build a grid from plain string rows (mostly for tests and demos)
    pub fn from_strings<S: AsRef<str>>(title: impl Into<String>, rows: &[Vec<S>]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|v| Cell::new(v.as_ref())).collect())
            .collect();
        Self::new(title, rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// True when every row has the same number of cells
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|row| row.len() == width)
    }

    /// True when no cell holds anything but whitespace
    pub fn is_blank(&self) -> bool {
        self.rows.iter().flatten().all(Cell::is_blank)
    }

    /// Look up a cell; out-of-range positions yield `None`
    pub fn cell(&self, position: CellPosition) -> Option<&Cell> {
        self.rows.get(position.row)?.get(position.column)
    }

    /// Value of the cell at `position`, if it exists
    pub fn value_at(&self, position: CellPosition) -> Option<&str> {
        self.cell(position).map(|c| c.value.as_str())
    }

    /// Plain string view of the rows
    pub fn values(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.value.clone()).collect())
            .collect()
    }

    // === Mutations (each returns a new snapshot) ===

    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: self.rows.clone(),
        }
    }

    /// Replace all rows, keeping the title
    pub fn with_rows(&self, rows: Vec<Row>, policy: Rectangularity) -> Self {
        Self {
            title: self.title.clone(),
            rows: apply_policy(rows, policy),
        }
    }

    /// Append rows after the existing ones, keeping the title
    pub fn with_appended(&self, rows: Vec<Row>, policy: Rectangularity) -> Self {
        let mut combined = Vec::with_capacity(self.rows.len() + rows.len());
        combined.extend(self.rows.iter().cloned());
        combined.extend(rows);
        self.with_rows(combined, policy)
    }

    /// Set a single cell value. Returns `None` if the position is out of range.
    pub fn with_cell(&self, position: CellPosition, value: impl Into<String>) -> Option<Self> {
        self.cell(position)?;
        let mut rows = self.rows.clone();
        rows[position.row][position.column] = Cell::new(value);
        Some(Self {
            title: self.title.clone(),
            rows,
        })
    }

    /// Append a row of empty cells as wide as the grid (at least one cell)
    pub fn with_empty_row(&self) -> Self {
        let width = self.column_count().max(1);
        let mut rows = self.rows.clone();
        rows.push(vec![Cell::empty(); width]);
        Self {
            title: self.title.clone(),
            rows,
        }
    }

    /// Append an empty cell to every row
    pub fn with_empty_column(&self) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.push(Cell::empty());
                row
            })
            .collect();
        Self {
            title: self.title.clone(),
            rows,
        }
    }

    /// Panic with context if rectangularity is broken (debug builds)
    #[cfg(debug_assertions)]
    pub fn assert_invariants_with_context(&self, context: &str, policy: Rectangularity) {
        if policy == Rectangularity::WholeGrid {
            assert!(
                self.is_rectangular(),
                "grid lost rectangularity after {}: widths {:?}",
                context,
                self.rows.iter().map(Vec::len).collect::<Vec<_>>()
            );
        }
    }
}

fn apply_policy(rows: Vec<Row>, policy: Rectangularity) -> Vec<Row> {
    match policy {
        Rectangularity::WholeGrid => pad_rows(rows),
        Rectangularity::PerBatch => rows,
    }
}

impl Grid {
    /// Build a grid from untrusted JSON rows
    pub fn from_raw(title: impl Into<String>, raw: &serde_json::Value) -> Self {
        Self {
            title: title.into(),
            rows: canonicalize_rows(raw),
        }
    }
}
