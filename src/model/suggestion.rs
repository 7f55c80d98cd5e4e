//! Suggestion cycle: inline auto-completion keyed to the active cell
//!
//! The cycle keeps an explicit request context (active cell, its value and a
//! grid snapshot). Whenever that context changes a new request is issued and
//! the generation counter moves forward; results carrying an older
//! generation are dropped on arrival.
//!
//! ```text
//!          context changed            result ok
//! Idle ─────────────────▶ Loading ─────────────▶ Available(rows)
//!  ▲                        │  ▲                     │
//!  │  disabled / error      │  └─────────────────────┘
//!  └────────────────────────┘     context changed
//! ```

use serde::Serialize;
use serde_json::Value;

use super::active_cell::ActiveCell;
use super::grid::{CellPosition, Grid, Row};
use crate::canonical::{canonicalize_rows, rows_to_cells_value};

/// Everything a suggestion depends on. Equality of two contexts decides
/// whether a new request is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub active_cell: CellPosition,
    pub active_value: Option<String>,
    pub grid: Grid,
}

impl RequestContext {
    /// Build the context for the current state, or `None` when suggestions
    /// are gated off (no focused cell, or nothing typed into the grid yet).
    pub fn capture(grid: &Grid, active: &ActiveCell) -> Option<Self> {
        let active_cell = active.current()?;
        if grid.is_blank() {
            return None;
        }
        Some(Self {
            active_cell,
            active_value: active.value_in(grid).map(str::to_owned),
            grid: grid.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SuggestionState {
    #[default]
    Idle,
    Loading,
    Available(Vec<Row>),
}

impl SuggestionState {
    pub fn name(&self) -> &'static str {
        match self {
            SuggestionState::Idle => "idle",
            SuggestionState::Loading => "loading",
            SuggestionState::Available(_) => "available",
        }
    }
}

/// Rows sent to the suggestion supplier (`{"rows": [{"cells": [...]}]}`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionContext {
    pub rows: Value,
}

/// Outbound request for the suggestion supplier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionRequest {
    /// Context key; echoed back with the result
    pub generation: u64,
    pub instructions: String,
    pub context: SuggestionContext,
    pub enabled: bool,
}

/// Compose the instruction text for a context
pub fn build_instructions(base: &str, context: &RequestContext) -> String {
    let position = serde_json::json!({
        "row": context.active_cell.row,
        "column": context.active_cell.column,
    });
    let value = match &context.active_value {
        Some(v) => Value::String(v.clone()),
        None => Value::Null,
    };
    format!(
        "{} The user currently selected cell is: {} The value of the cell is: {}",
        base.trim_end(),
        position,
        value
    )
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionCycle {
    state: SuggestionState,
    context: Option<RequestContext>,
    generation: u64,
}

impl SuggestionCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SuggestionState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn context(&self) -> Option<&RequestContext> {
        self.context.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.context.is_some()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SuggestionState::Loading)
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, SuggestionState::Available(_))
    }

    /// Candidate rows for the preview panel
    pub fn candidate_rows(&self) -> Option<&[Row]> {
        match &self.state {
            SuggestionState::Available(rows) => Some(rows),
            _ => None,
        }
    }

    /// Bring the cycle in line with the latest context.
    ///
    /// Returns a request when the context key changed while enabled. A
    /// disabled cycle drops back to idle and supersedes anything in flight.
    pub fn sync(
        &mut self,
        next: Option<RequestContext>,
        instructions: &str,
    ) -> Option<SuggestionRequest> {
        let Some(next) = next else {
            if self.context.take().is_some() || self.state != SuggestionState::Idle {
                self.generation += 1;
                self.state = SuggestionState::Idle;
                tracing::debug!(generation = self.generation, "suggestions disabled");
            }
            return None;
        };

        if self.context.as_ref() == Some(&next) {
            return None;
        }

        self.generation += 1;
        self.state = SuggestionState::Loading;
        let request = SuggestionRequest {
            generation: self.generation,
            instructions: build_instructions(instructions, &next),
            context: SuggestionContext {
                rows: rows_to_cells_value(&next.grid.rows),
            },
            enabled: true,
        };
        tracing::debug!(
            generation = self.generation,
            row = next.active_cell.row,
            column = next.active_cell.column,
            "requesting suggestion"
        );
        self.context = Some(next);
        Some(request)
    }

    /// Apply a supplier result. Returns `true` if the visible state changed.
    ///
    /// Results for an older generation are discarded. Errors and malformed
    /// payloads leave the cycle idle with nothing to apply.
    pub fn resolve(&mut self, generation: u64, result: Result<Option<Value>, String>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "Discarding stale suggestion: generation {} != current {}",
                generation,
                self.generation
            );
            return false;
        }
        if !self.is_loading() {
            tracing::debug!(generation, "suggestion result without pending request");
            return false;
        }

        self.state = match result {
            Ok(Some(payload)) => match suggested_rows(&payload) {
                Some(rows) => SuggestionState::Available(rows),
                None => {
                    tracing::warn!(generation, "malformed suggestion payload ignored");
                    SuggestionState::Idle
                }
            },
            Ok(None) => SuggestionState::Idle,
            Err(e) => {
                tracing::debug!(generation, "suggestion supplier failed: {}", e);
                SuggestionState::Idle
            }
        };
        true
    }

    /// Take the available suggestion for applying to the grid.
    /// No-op (returns `None`) in any other state.
    pub fn take_available(&mut self) -> Option<Vec<Row>> {
        match std::mem::take(&mut self.state) {
            SuggestionState::Available(rows) => Some(rows),
            other => {
                self.state = other;
                None
            }
        }
    }
}

/// Extract canonical rows from a `{"rows": [...]}` payload
fn suggested_rows(payload: &Value) -> Option<Vec<Row>> {
    match payload.get("rows") {
        Some(Value::Array(rows)) if !rows.is_empty() => Some(canonicalize_rows(payload)),
        _ => None,
    }
}
