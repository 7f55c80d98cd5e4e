//! Seams to the outside world: where suggestions come from and where
//! accepted grids go

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use serde::Deserialize;
use serde_json::Value;

use crate::model::{Grid, SuggestionRequest};

/// Asynchronous suggestion supplier
///
/// Called from a worker thread, once per request. `Ok(None)` means the
/// supplier had nothing to offer.
pub trait SuggestionProvider: Send + Sync {
    /// Called on the session thread, in request order, before the worker
    /// for `request` starts
    fn dispatched(&self, _request: &SuggestionRequest) {}

    fn suggest(&self, request: &SuggestionRequest) -> anyhow::Result<Option<Value>>;
}

/// Receives every newly materialized grid
pub trait GridConsumer {
    fn grid_changed(&mut self, grid: &Grid);
}

impl<F: FnMut(&Grid)> GridConsumer for F {
    fn grid_changed(&mut self, grid: &Grid) {
        self(grid)
    }
}

/// One queued answer for `ScriptedProvider`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedResponse {
    /// Raw supplier payload, normally `{"rows": [...]}`
    Payload(Value),
    /// Supplier returned nothing
    Empty,
    /// Supplier failed with this message
    Error(String),
}

/// Provider that answers from a queue, for replays and tests
///
/// Responses are paired with requests in dispatch order, keyed by
/// generation, so worker scheduling never changes which answer a request
/// gets. Once the queue runs dry every request resolves to `Ok(None)`.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    assigned: Mutex<HashMap<u64, Option<ScriptedResponse>>>,
    requests: Mutex<Vec<SuggestionRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: impl IntoIterator<Item = ScriptedResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            assigned: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, response: ScriptedResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    /// Requests seen so far, oldest first
    pub fn requests(&self) -> Vec<SuggestionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Record `request` and take the next queued response for it
    fn take_next(&self, request: &SuggestionRequest) -> Option<ScriptedResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

impl SuggestionProvider for ScriptedProvider {
    fn dispatched(&self, request: &SuggestionRequest) {
        let next = self.take_next(request);
        self.assigned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(request.generation, next);
    }

    fn suggest(&self, request: &SuggestionRequest) -> anyhow::Result<Option<Value>> {
        let assigned = self
            .assigned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&request.generation);
        // Called directly, without a session in front
        let next = assigned.unwrap_or_else(|| self.take_next(request));

        match next {
            Some(ScriptedResponse::Payload(value)) => Ok(Some(value)),
            Some(ScriptedResponse::Empty) | None => Ok(None),
            Some(ScriptedResponse::Error(message)) => Err(anyhow::anyhow!(message)),
        }
    }
}
