//! ContentCraft - a minimal tool-dispatch layer over a chat-completion API
//!
//! The model is asked to pick one of a few registered content writers and
//! answer with `{"name": ..., "args": {...}}`; the dispatcher parses that
//! answer, runs the chosen tool locally, and returns an [`Envelope`].

pub mod dispatch;
pub mod error;
pub mod llm;
pub mod tools;

pub use dispatch::{DispatchConfig, Dispatcher, Envelope, ToolCall};
pub use error::{ContentCraftError, Result};
