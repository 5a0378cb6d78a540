//! Dispatch - free-text input to a single tool invocation
//!
//! Flow: selection prompt → completion call → JSON extraction → tool lookup →
//! argument validation → execution → envelope.

mod dispatcher;
mod envelope;
mod extract;

pub use dispatcher::{DispatchConfig, Dispatcher, build_selection_prompt};
pub use envelope::{Envelope, NOT_JSON_ERROR, ToolCall};
pub use extract::{extract_json, find_json_spans};
