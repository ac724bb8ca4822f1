//! A local fake model for testing purpose.

mod preset;

use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use deep_agent_model::{
    ErrorKind, ModelFinishReason, ModelMessage, ModelProvider,
    ModelProviderError, ModelReply, ModelRequest,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// model should reply to a request. The reply is selected by the number of
/// assistant messages already present in the request, so the first request
/// of a conversation gets the first reply, the request carrying one
/// assistant message gets the second, and so on. If there are no enough
/// replies in the script, an error will be returned.
///
/// Every request is recorded, and clones of the provider share the same
/// record, so tests can keep a clone and inspect what the agent sent.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    script: Vec<PresetReply>,
    delay: Option<Duration>,
    received: Arc<Mutex<Vec<ModelRequest>>>,
}

impl TestModelProvider {
    #[inline]
    pub fn add_reply(&mut self, preset: PresetReply) {
        self.script.push(preset);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns a copy of every request received so far.
    pub fn received_requests(&self) -> Vec<ModelRequest> {
        match self.received.lock() {
            Ok(received) => received.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelReply, Self::Error>> + Send + 'static
    {
        if let Ok(mut received) = self.received.lock() {
            received.push(req.clone());
        }

        let step_idx = req
            .messages
            .iter()
            .filter(|msg| matches!(msg, ModelMessage::Assistant { .. }))
            .count();
        let preset = self.script.get(step_idx).cloned();
        let delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;

            let Some(preset) = preset else {
                return Err(Error {
                    message: "no enough steps",
                    kind: ErrorKind::Other,
                });
            };
            if let Some(kind) = preset.failure {
                return Err(Error {
                    message: "preset failure",
                    kind,
                });
            }

            let finish_reason = if preset.tool_calls.is_empty() {
                ModelFinishReason::Stop
            } else {
                ModelFinishReason::ToolCalls
            };
            Ok(ModelReply {
                content: preset.content,
                tool_calls: preset.tool_calls,
                finish_reason,
            })
        }
    }
}
