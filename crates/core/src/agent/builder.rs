use std::sync::Arc;

use deep_agent_model::ModelProvider;

use super::{Agent, DEFAULT_MAX_TURNS};
use crate::model_client::ModelClient;
use crate::tool::{Executor as ToolExecutor, Tool, ToolObject, ToolObjectImpl};

/// [`Agent`] builder.
pub struct AgentBuilder {
    model_client: ModelClient,
    system_prompt: Option<String>,
    tools: Vec<Arc<dyn ToolObject>>,
    max_turns: usize,
}

impl AgentBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            system_prompt: None,
            tools: vec![],
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Sets the system prompt sent before the conversation.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Registers a tool.
    #[inline]
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Self {
        self.tools.push(Arc::new(ToolObjectImpl(tool)));
        self
    }

    /// Limits how many model requests one invocation may make. Values
    /// below 1 are treated as 1.
    #[inline]
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns.max(1);
        self
    }

    /// Builds the agent.
    #[inline]
    pub fn build(self) -> Agent {
        Agent {
            model_client: self.model_client,
            tool_executor: Arc::new(ToolExecutor::with_tools(self.tools)),
            system_prompt: self.system_prompt,
            max_turns: self.max_turns,
        }
    }
}
