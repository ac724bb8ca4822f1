use deep_agent_model::{ErrorKind, ToolCallRequest};
use serde::{Deserialize, Serialize};

/// The preset reply for one assistant step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetReply {
    /// Text content of the reply.
    #[serde(default)]
    pub content: Option<String>,
    /// Tool calls in this reply.
    #[serde(default)]
    pub tool_calls: Vec<ToolCallRequest>,
    /// If set, the request fails with this kind instead of replying.
    #[serde(skip)]
    pub failure: Option<ErrorKind>,
}

impl PresetReply {
    /// Creates a text-only `PresetReply`.
    #[inline]
    pub fn text<S: Into<String>>(content: S) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Creates a `PresetReply` that only calls tools.
    #[inline]
    pub fn with_tool_calls(
        tool_calls: impl IntoIterator<Item = ToolCallRequest>,
    ) -> Self {
        Self {
            tool_calls: tool_calls.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Creates a `PresetReply` that makes the request fail.
    #[inline]
    pub fn failing(kind: ErrorKind) -> Self {
        Self {
            failure: Some(kind),
            ..Default::default()
        }
    }

    /// Sets the text content alongside the tool calls.
    #[inline]
    pub fn with_content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = Some(content.into());
        self
    }
}
