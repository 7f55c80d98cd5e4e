//! Session driver
//!
//! Owns the model and is its only writer. Suggestion requests run on worker
//! threads and report back through an mpsc channel; results are applied on
//! the next `pump()` or `settle()`.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use crate::commands::Cmd;
use crate::config::GridConfig;
use crate::keymap::{Keymap, Keystroke};
use crate::messages::{AppMsg, Msg, SuggestionMsg};
use crate::model::{AppModel, Grid};
use crate::update::update;

use super::input::keystroke_to_msgs;
use super::provider::{GridConsumer, SuggestionProvider};

/// Longest `settle()` waits for a single worker to report back
const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Session {
    model: AppModel,
    keymap: Keymap,
    provider: Arc<dyn SuggestionProvider>,
    consumer: Option<Box<dyn GridConsumer>>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Suggestion workers that have not reported back yet
    in_flight: usize,
}

impl Session {
    pub fn new(model: AppModel, keymap: Keymap, provider: Arc<dyn SuggestionProvider>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            keymap,
            provider,
            consumer: None,
            msg_tx,
            msg_rx,
            in_flight: 0,
        }
    }

    /// Attach the outbound grid consumer
    pub fn with_consumer(mut self, consumer: impl GridConsumer + 'static) -> Self {
        self.consumer = Some(Box::new(consumer));
        self
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn grid(&self) -> &Grid {
        &self.model.grid
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn into_model(self) -> AppModel {
        self.model
    }

    /// Run one message through `update` and execute the resulting command
    ///
    /// Returns whether the host should redraw.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        match update(&mut self.model, msg) {
            Some(cmd) => {
                let redraw = cmd.needs_redraw();
                self.process_cmd(cmd);
                redraw
            }
            None => false,
        }
    }

    /// Route a keystroke through the keymap
    ///
    /// Returns `true` when the keystroke was consumed and the host must
    /// suppress its default handling.
    pub fn handle_keystroke(&mut self, keystroke: Keystroke) -> bool {
        let Some(msgs) = keystroke_to_msgs(&self.keymap, &self.model, keystroke) else {
            return false;
        };
        for msg in msgs {
            self.dispatch(msg);
        }
        true
    }

    /// Swap in a new configuration
    pub fn reload_config(&mut self, config: GridConfig) -> bool {
        self.dispatch(Msg::App(AppMsg::ConfigReloaded(Box::new(config))))
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None | Cmd::Redraw => {}
            Cmd::RequestSuggestion(request) => {
                let tx = self.msg_tx.clone();
                let provider = Arc::clone(&self.provider);
                provider.dispatched(&request);
                self.in_flight += 1;
                std::thread::spawn(move || {
                    let generation = request.generation;
                    let result = provider.suggest(&request).map_err(|e| {
                        tracing::warn!(generation, "suggestion provider failed: {:#}", e);
                        format!("{:#}", e)
                    });
                    let _ = tx.send(Msg::suggestion_resolved(generation, result));
                });
            }
            Cmd::EmitGrid(grid) => {
                if let Some(consumer) = self.consumer.as_mut() {
                    consumer.grid_changed(&grid);
                }
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    fn receive(&mut self, msg: Msg) -> bool {
        if matches!(msg, Msg::Suggestion(SuggestionMsg::Resolved { .. })) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        self.dispatch(msg)
    }

    /// Apply every result that has already arrived, without blocking
    ///
    /// Returns whether any of them asked for a redraw.
    pub fn pump(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            needs_redraw |= self.receive(msg);
        }
        needs_redraw
    }

    /// Block until every outstanding suggestion request has reported back
    ///
    /// Returns `false` if a worker failed to report within the timeout.
    pub fn settle(&mut self) -> bool {
        self.pump();
        while self.in_flight > 0 {
            match self.msg_rx.recv_timeout(SETTLE_TIMEOUT) {
                Ok(msg) => {
                    self.receive(msg);
                }
                Err(RecvTimeoutError::Timeout) => {
                    tracing::warn!(
                        in_flight = self.in_flight,
                        "gave up waiting for suggestion workers"
                    );
                    return false;
                }
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }
}
