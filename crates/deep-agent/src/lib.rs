//! An out-of-the-box weather agent that assembles the built-in tools and an
//! OpenAI-compatible model provider.
//!
//! The crate includes a CLI that asks the agent one question and prints the
//! report of the conversation. It can also be used as a library.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod config;
mod session;
pub mod tools;

pub use config::{AppConfig, ConfigError};
pub use session::{Session, SessionBuilder};

/// Re-exports of [`deep_agent_core`] crate.
pub mod core {
    pub use deep_agent_core::*;
}
