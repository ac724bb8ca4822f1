//! Conversation transcript types.
//!
//! A [`Transcript`] is the ordered list of messages produced by one agent
//! invocation: the user's input first, then assistant replies interleaved
//! with tool results, and the assistant's final answer last.
//!
//! Every field tolerates being absent or `null` when deserialized, so a
//! transcript loaded from a partial JSON document still renders.

use std::slice;

use deep_agent_model::{ModelMessage, ModelReply, ToolCallRequest, ToolCallResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Who produced a message.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human side of the conversation.
    #[default]
    User,
    /// The model.
    Assistant,
    /// The output of a tool call.
    Tool,
}

/// A tool invocation requested by the assistant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default, deserialize_with = "null_as_default")]
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "object_or_empty")]
    arguments: Map<String, Value>,
}

impl ToolCall {
    /// Creates a tool call.
    pub fn new<S1: Into<String>, S2: Into<String>>(
        id: S1,
        name: S2,
        arguments: Map<String, Value>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Returns the id the model assigned to this call.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the tool name, empty if the model did not provide one.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the arguments, keyed by parameter name.
    #[inline]
    pub fn arguments(&self) -> &Map<String, Value> {
        &self.arguments
    }
}

impl From<ToolCallRequest> for ToolCall {
    fn from(req: ToolCallRequest) -> Self {
        let arguments = match req.arguments {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            id: req.id,
            name: req.name,
            arguments,
        }
    }
}

impl From<&ToolCall> for ToolCallRequest {
    fn from(call: &ToolCall) -> Self {
        ToolCallRequest {
            id: call.id.clone(),
            name: call.name.clone(),
            arguments: Value::Object(call.arguments.clone()),
        }
    }
}

/// One entry of a transcript.
///
/// Messages are immutable once built, the role is fixed at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "null_as_default")]
    role: Role,
    #[serde(default)]
    content: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl Message {
    /// Creates a user message.
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Creates an assistant message.
    pub fn assistant(
        content: Option<String>,
        tool_calls: impl IntoIterator<Item = ToolCall>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content,
            tool_calls: tool_calls.into_iter().collect(),
            tool_call_id: None,
        }
    }

    /// Creates a tool result message answering the call with `tool_call_id`.
    pub fn tool<S1: Into<String>, S2: Into<String>>(
        tool_call_id: S1,
        content: S2,
    ) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: vec![],
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    /// Returns the role of this message.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the text content, or an empty string if there is none.
    #[inline]
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// Returns the tool calls carried by this message.
    #[inline]
    pub fn tool_calls(&self) -> &[ToolCall] {
        &self.tool_calls
    }

    /// Returns the id of the call a tool message answers.
    #[inline]
    pub fn tool_call_id(&self) -> Option<&str> {
        self.tool_call_id.as_deref()
    }

    pub(crate) fn from_reply(reply: ModelReply) -> Self {
        Self::assistant(
            reply.content,
            reply.tool_calls.into_iter().map(ToolCall::from),
        )
    }

    pub(crate) fn to_model_message(&self) -> ModelMessage {
        match self.role {
            Role::User => ModelMessage::User(self.content().to_owned()),
            Role::Assistant => ModelMessage::Assistant {
                content: self.content.clone(),
                tool_calls: self.tool_calls.iter().map(Into::into).collect(),
            },
            Role::Tool => ModelMessage::Tool(ToolCallResult {
                id: self.tool_call_id.clone().unwrap_or_default(),
                content: self.content().to_owned(),
            }),
        }
    }
}

/// The ordered messages of one conversation, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Returns all messages in chronological order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns an iterator over the messages.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Returns the most recent message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns the content of the last message, which after a successful
    /// invocation is the assistant's final answer.
    #[inline]
    pub fn final_reply(&self) -> Option<&str> {
        self.last().map(Message::content)
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if there are no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[inline]
    pub(crate) fn push(&mut self, msg: Message) {
        self.messages.push(msg);
    }
}

impl From<Vec<Message>> for Transcript {
    #[inline]
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl FromIterator<Message> for Transcript {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = slice::Iter<'a, Message>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn object_or_empty<'de, D>(
    deserializer: D,
) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}
