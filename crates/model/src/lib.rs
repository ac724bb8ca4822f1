//! Model-facing types shared by the agent and its providers.
//!
//! The agent talks to language models only through the types in this
//! crate: it builds a [`ModelRequest`], hands it to a [`ModelProvider`],
//! and gets back a [`ModelReply`]. Providers translate these types to
//! and from their own wire formats, so the agent never needs to know
//! which endpoint it is talking to.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
