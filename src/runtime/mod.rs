//! Runtime - drives the update loop against the outside world
//!
//! - `session` - single-writer driver owning the model and the result channel
//! - `provider` - suggestion supplier and grid consumer seams
//! - `input` - keystroke to message routing

pub mod input;
pub mod provider;
pub mod session;

pub use provider::{GridConsumer, ScriptedProvider, ScriptedResponse, SuggestionProvider};
pub use session::Session;
