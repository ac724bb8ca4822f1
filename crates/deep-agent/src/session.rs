use deep_agent_core::{Agent, AgentBuilder, Transcript};
use deep_agent_model::ModelProvider;

use crate::tools::*;

const SYSTEM_PROMPT: &str = include_str!("./system_prompt.md");
const MINIMAL_SYSTEM_PROMPT: &str = include_str!("./minimal_prompt.md");

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    agent_builder: AgentBuilder,
    system_prompt: Option<String>,
    minimal: bool,
}

impl SessionBuilder {
    /// Creates a session builder with a specified model provider.
    pub fn with_model_provider<M: ModelProvider + 'static>(
        provider: M,
    ) -> Self {
        let agent_builder = AgentBuilder::with_model_provider(provider);
        Self {
            agent_builder,
            system_prompt: None,
            minimal: false,
        }
    }

    /// Overrides the built-in system prompt.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Runs the agent without tools and with a shorter prompt, for
    /// endpoints that don't support tool calling.
    #[inline]
    pub fn with_minimal(mut self, minimal: bool) -> Self {
        self.minimal = minimal;
        self
    }

    /// Limits how many model requests one message may cause.
    #[inline]
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.agent_builder = self.agent_builder.with_max_turns(max_turns);
        self
    }

    /// Builds a new session.
    pub fn build(self) -> Session {
        let default_prompt = if self.minimal {
            info!("minimal mode is enabled, no tools are registered");
            MINIMAL_SYSTEM_PROMPT
        } else {
            SYSTEM_PROMPT
        };
        let system_prompt = self
            .system_prompt
            .unwrap_or_else(|| default_prompt.trim().to_owned());

        let mut agent_builder =
            self.agent_builder.with_system_prompt(system_prompt);
        if !self.minimal {
            agent_builder = agent_builder
                .with_tool(GetWeatherTool::new())
                .with_tool(GetCurrentTimeTool::new());
        }

        Session {
            agent: agent_builder.build(),
        }
    }
}

/// A one-shot chat session.
///
/// The session holds a fully configured agent that you can use directly, and
/// it is basically a wrapper around [`Agent`]. Messages sent to it don't see
/// each other.
#[derive(Clone)]
pub struct Session {
    agent: Agent,
}

impl Session {
    /// Sends a message and waits for the agent to finish.
    #[inline]
    pub async fn send_message(
        &self,
        message: &str,
    ) -> Result<Transcript, deep_agent_core::Error> {
        self.agent.ask(message).await
    }

    /// Returns the underlying agent.
    #[inline]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }
}

#[cfg(test)]
mod tests {
    use deep_agent_core::Role;
    use deep_agent_model::{ModelMessage, ToolCallRequest};
    use deep_agent_test_model::{PresetReply, TestModelProvider};
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_default_session() {
        let mut model_provider = TestModelProvider::default();
        model_provider.add_reply(PresetReply::with_tool_calls([
            ToolCallRequest {
                id: "call_1".to_owned(),
                name: "get_weather".to_owned(),
                arguments: json!({ "city": "Seoul" }),
            },
        ]));
        model_provider.add_reply(PresetReply::text("It's sunny in Seoul."));
        let recorder = model_provider.clone();

        let session = SessionBuilder::with_model_provider(model_provider).build();
        let transcript = session
            .send_message("What's the weather in Seoul?")
            .await
            .unwrap();

        let tool_msg = &transcript.messages()[2];
        assert_eq!(tool_msg.role(), Role::Tool);
        assert_eq!(tool_msg.content(), "Weather in Seoul: sunny, 22°C");

        let requests = recorder.received_requests();
        let names = requests[0]
            .tools
            .iter()
            .map(|tool| tool.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["get_weather", "get_current_time"]);
        assert_eq!(
            requests[0].messages[0],
            ModelMessage::System(SYSTEM_PROMPT.trim().to_owned())
        );
    }

    #[tokio::test]
    async fn test_minimal_session() {
        let mut model_provider = TestModelProvider::default();
        model_provider.add_reply(PresetReply::text("It's probably sunny."));
        let recorder = model_provider.clone();

        let session = SessionBuilder::with_model_provider(model_provider)
            .with_minimal(true)
            .build();
        let transcript = session.send_message("Weather?").await.unwrap();
        assert_eq!(transcript.final_reply(), Some("It's probably sunny."));

        let requests = recorder.received_requests();
        assert!(requests[0].tools.is_empty());
        assert_eq!(
            requests[0].messages[0],
            ModelMessage::System(MINIMAL_SYSTEM_PROMPT.trim().to_owned())
        );
    }

    #[tokio::test]
    async fn test_custom_prompt() {
        let mut model_provider = TestModelProvider::default();
        model_provider.add_reply(PresetReply::text("Hello!"));
        let recorder = model_provider.clone();

        let session = SessionBuilder::with_model_provider(model_provider)
            .with_system_prompt("Be brief.")
            .build();
        session.send_message("Hi").await.unwrap();

        let requests = recorder.received_requests();
        assert_eq!(
            requests[0].messages[0],
            ModelMessage::System("Be brief.".to_owned())
        );
    }
}
