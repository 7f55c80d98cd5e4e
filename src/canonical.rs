//! Canonicalization of untrusted row data
//!
//! Row data arrives from the assistant as loosely shaped JSON. Every shape
//! below is accepted and normalized into a rectangular `Vec<Row>`:
//!
//! ```text
//! [{"cells": [{"value": "a"}, {"value": 1}]}, ...]   // assistant shape
//! [[{"value": "a"}, {"value": "b"}], ...]            // grid shape
//! [["a", 1, true, null], ...]                        // bare scalars
//! {"rows": [...]}                                    // wrapped in an object
//! ```
//!
//! Nothing here fails: missing values become empty text, scalars are
//! stringified, and short rows are padded to the widest row.

use serde_json::{Map, Value};

use crate::model::{Cell, Row};

/// Canonicalize a raw JSON value holding rows (or `{"rows": [...]}`)
pub fn canonicalize_rows(raw: &Value) -> Vec<Row> {
    match raw {
        Value::Array(rows) => canonicalize(rows),
        Value::Object(obj) => obj.get("rows").map(canonicalize_rows).unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Canonicalize a sequence of row-like values
pub fn canonicalize(rows: &[Value]) -> Vec<Row> {
    pad_rows(rows.iter().map(canonical_row).collect())
}

/// Pad every row with empty cells up to the widest row
pub fn pad_rows(mut rows: Vec<Row>) -> Vec<Row> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        if row.len() < width {
            row.resize(width, Cell::empty());
        }
    }
    rows
}

/// Convert canonical rows back to the grid JSON shape (`[[{"value": ..}]]`)
pub fn rows_to_value(rows: &[Row]) -> Value {
    Value::Array(
        rows.iter()
            .map(|row| Value::Array(row.iter().map(cell_to_value).collect()))
            .collect(),
    )
}

/// Convert canonical rows to the assistant shape (`[{"cells": [..]}]`)
pub fn rows_to_cells_value(rows: &[Row]) -> Value {
    Value::Array(
        rows.iter()
            .map(|row| {
                let mut obj = Map::new();
                obj.insert(
                    "cells".to_string(),
                    Value::Array(row.iter().map(cell_to_value).collect()),
                );
                Value::Object(obj)
            })
            .collect(),
    )
}

fn cell_to_value(cell: &Cell) -> Value {
    let mut obj = Map::new();
    obj.insert("value".to_string(), Value::String(cell.value.clone()));
    Value::Object(obj)
}

fn canonical_row(raw: &Value) -> Row {
    match raw {
        Value::Array(cells) => cells.iter().map(canonical_cell).collect(),
        Value::Object(obj) => match obj.get("cells") {
            Some(Value::Array(cells)) => cells.iter().map(canonical_cell).collect(),
            _ => Row::new(),
        },
        _ => Row::new(),
    }
}

fn canonical_cell(raw: &Value) -> Cell {
    match raw {
        Value::Object(obj) => Cell::new(obj.get("value").map(value_to_text).unwrap_or_default()),
        other => Cell::new(value_to_text(other)),
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Nested structures keep their JSON text so nothing is dropped
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(rows: &[Row]) -> Vec<Vec<&str>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.value.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_assistant_shape() {
        let raw = json!([
            {"cells": [{"value": "a"}, {"value": "b"}]},
            {"cells": [{"value": "c"}]}
        ]);
        assert_eq!(
            values(&canonicalize_rows(&raw)),
            vec![vec!["a", "b"], vec!["c", ""]]
        );
    }

    #[test]
    fn test_pads_to_widest_row() {
        let raw = json!([["x"], ["a", "b", "c"], ["d", "e"]]);
        let rows = canonicalize_rows(&raw);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 3));
        assert_eq!(
            values(&rows),
            vec![vec!["x", "", ""], vec!["a", "b", "c"], vec!["d", "e", ""]]
        );
    }

    #[test]
    fn test_coerces_non_text_values() {
        let raw = json!([[{"value": 42}, {"value": 1.5}, {"value": true}, {"value": null}, {}]]);
        assert_eq!(
            values(&canonicalize_rows(&raw)),
            vec![vec!["42", "1.5", "true", "", ""]]
        );
    }

    #[test]
    fn test_nested_value_keeps_json_text() {
        let raw = json!([[{"value": {"k": 1}}, [1, 2]]]);
        assert_eq!(
            values(&canonicalize_rows(&raw)),
            vec![vec![r#"{"k":1}"#, "[1,2]"]]
        );
    }

    #[test]
    fn test_malformed_rows_become_empty() {
        let raw = json!([null, 7, {"cells": "nope"}, {"other": []}, ["a"]]);
        let rows = canonicalize_rows(&raw);
        assert_eq!(rows.len(), 5);
        assert_eq!(values(&rows)[4], vec!["a"]);
        assert!(rows[..4].iter().all(|r| r == &vec![Cell::empty()]));
    }

    #[test]
    fn test_non_array_input_yields_no_rows() {
        assert!(canonicalize_rows(&json!("rows")).is_empty());
        assert!(canonicalize_rows(&json!(null)).is_empty());
        assert!(canonicalize_rows(&json!({"title": "x"})).is_empty());
    }

    #[test]
    fn test_wrapped_rows_object() {
        let raw = json!({"rows": [{"cells": [{"value": "a"}]}]});
        assert_eq!(values(&canonicalize_rows(&raw)), vec![vec!["a"]]);
    }

    #[test]
    fn test_idempotent_on_both_output_shapes() {
        let raw = json!([["a"], [{"value": 2}, null, {"value": "c"}], {"cells": []}]);
        let once = canonicalize_rows(&raw);
        assert_eq!(canonicalize_rows(&rows_to_value(&once)), once);
        assert_eq!(canonicalize_rows(&rows_to_cells_value(&once)), once);
    }

    #[test]
    fn test_pad_rows_never_truncates() {
        let rows = vec![
            vec![Cell::new("a")],
            vec![Cell::new("b"), Cell::new("c")],
        ];
        let padded = pad_rows(rows);
        assert_eq!(values(&padded), vec![vec!["a", ""], vec!["b", "c"]]);
    }
}
