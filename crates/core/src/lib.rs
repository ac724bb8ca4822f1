//! Core logic including the agent loop, tool execution, transcripts and
//! their rendering.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod agent;
mod error;
mod model_client;
pub mod render;
pub mod tool;
pub mod transcript;

pub use agent::{Agent, AgentBuilder, DEFAULT_MAX_TURNS};
pub use error::Error;
pub use render::{Report, render};
pub use transcript::{Message, Role, ToolCall, Transcript};
