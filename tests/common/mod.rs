//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};

use gridpilot::config::GridConfig;
use gridpilot::keymap::{default_bindings, Keymap};
use gridpilot::model::{AppModel, CellPosition, Grid, Rectangularity};
use gridpilot::runtime::{ScriptedProvider, ScriptedResponse, Session};

/// Model over `rows` with default configuration
pub fn test_model(rows: &[Vec<&str>]) -> AppModel {
    AppModel::new(Grid::from_strings("Test", rows), GridConfig::default())
}

/// Model over `rows` with the cell at (`row`, `column`) focused
pub fn focused_model(rows: &[Vec<&str>], row: usize, column: usize) -> AppModel {
    let mut model = test_model(rows);
    model.active.activate(CellPosition::new(row, column));
    model
}

/// Model using the per-batch rectangularity policy
pub fn per_batch_model(rows: &[Vec<&str>]) -> AppModel {
    let config = GridConfig {
        rectangularity: Rectangularity::PerBatch,
        ..GridConfig::default()
    };
    AppModel::new(Grid::from_strings("Test", rows), config)
}

/// Supplier payload in the `{"rows": [{"cells": [...]}]}` shape
pub fn payload(rows: &[Vec<&str>]) -> Value {
    let rows: Vec<Value> = rows
        .iter()
        .map(|row| {
            let cells: Vec<Value> = row.iter().map(|v| json!({ "value": v })).collect();
            json!({ "cells": cells })
        })
        .collect();
    json!({ "rows": rows })
}

/// Session with default bindings over a scripted provider
pub fn test_session(
    model: AppModel,
    responses: Vec<ScriptedResponse>,
) -> (Session, Arc<ScriptedProvider>) {
    let provider = Arc::new(ScriptedProvider::new(responses));
    let session = Session::new(
        model,
        Keymap::with_bindings(default_bindings()),
        provider.clone(),
    );
    (session, provider)
}
