mod builder;

use std::sync::Arc;

use deep_agent_model::{ModelFinishReason, ModelMessage, ModelRequest};

use crate::error::Error;
use crate::model_client::ModelClient;
use crate::tool::Executor as ToolExecutor;
use crate::transcript::{Message, Transcript};
pub use builder::AgentBuilder;

/// How many model requests one invocation may make by default.
pub const DEFAULT_MAX_TURNS: usize = 25;

/// An agent instance, which holds a model provider, the tools the model may
/// call, and the system prompt.
///
/// The agent keeps no conversation state between invocations. Every call to
/// [`Agent::invoke`] starts from the messages it is given and returns the
/// complete transcript of that run.
#[derive(Clone)]
pub struct Agent {
    model_client: ModelClient,
    tool_executor: Arc<ToolExecutor>,
    system_prompt: Option<String>,
    max_turns: usize,
}

impl Agent {
    /// Runs the conversation until the model replies without calling any
    /// tool, and returns the transcript including the input messages.
    ///
    /// Tool calls are executed one by one in the order the model emitted
    /// them. A failing tool doesn't abort the run, its error is reported
    /// back to the model as the tool's output.
    pub async fn invoke<I>(&self, messages: I) -> Result<Transcript, Error>
    where
        I: IntoIterator<Item = Message>,
    {
        let mut transcript: Transcript = messages.into_iter().collect();

        for turn in 1..=self.max_turns {
            let request = self.build_model_request(&transcript);
            debug!("turn {turn}: sending {} messages", request.messages.len());

            let reply = self
                .model_client
                .send_request(request)
                .await
                .map_err(Error::Model)?;
            if reply.finish_reason == ModelFinishReason::Length {
                warn!("reply was cut off by the output token limit");
            }

            if !reply.has_tool_calls() {
                transcript.push(Message::from_reply(reply));
                debug!("finished after {turn} turns");
                return Ok(transcript);
            }
            let tool_calls = reply.tool_calls.clone();
            transcript.push(Message::from_reply(reply));

            for req in tool_calls {
                let content = match self.tool_executor.execute(&req).await {
                    Ok(output) => output,
                    Err(err) => {
                        warn!("tool call {} failed: {err}", req.id);
                        format!("Error: {}", err.reason())
                    }
                };
                transcript.push(Message::tool(req.id, content));
            }
        }

        Err(Error::TurnLimitExceeded(self.max_turns))
    }

    /// Shorthand for invoking the agent with a single user message.
    #[inline]
    pub async fn ask<S: Into<String>>(
        &self,
        input: S,
    ) -> Result<Transcript, Error> {
        self.invoke([Message::user(input)]).await
    }

    fn build_model_request(&self, transcript: &Transcript) -> ModelRequest {
        let system = self.system_prompt.iter().cloned().map(ModelMessage::System);
        ModelRequest {
            messages: system
                .chain(transcript.iter().map(Message::to_model_message))
                .collect(),
            tools: self.tool_executor.definitions(),
        }
    }
}
