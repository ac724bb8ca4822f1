use deep_agent_model::{
    ErrorKind, ModelFinishReason, ModelMessage, ModelReply, ModelRequest,
    ModelTool, ToolCallRequest,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, OpenAIConfig};

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ResponseToolCall>>,
}

// Some compatible servers omit fields they consider obvious, so everything
// here is optional and patched up in `create_reply`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ResponseToolCall {
    pub id: Option<String>,
    pub function: Option<ResponseFunctionCall>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ResponseFunctionCall {
    pub name: Option<String>,
    pub arguments: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct FunctionTool {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct Tool {
    r#type: &'static str,
    function: FunctionTool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct ToolCall {
    id: String,
    r#type: &'static str,
    function: FunctionCall,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
enum Message {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        content: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<ToolCall>>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    stream: bool,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(
    req: &ModelRequest,
    config: &OpenAIConfig,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: req.messages.iter().map(create_message).collect(),
        tools: req.tools.iter().map(create_tool).collect(),
        stream: false,
    }
}

fn create_message(msg: &ModelMessage) -> Message {
    match msg {
        ModelMessage::System(content) => Message::System {
            content: content.clone(),
        },
        ModelMessage::User(content) => Message::User {
            content: content.clone(),
        },
        ModelMessage::Assistant {
            content,
            tool_calls,
        } => Message::Assistant {
            content: content.clone(),
            tool_calls: if tool_calls.is_empty() {
                None
            } else {
                Some(tool_calls.iter().map(create_tool_call).collect())
            },
        },
        ModelMessage::Tool(result) => Message::Tool {
            tool_call_id: result.id.clone(),
            content: result.content.clone(),
        },
    }
}

#[inline]
fn create_tool_call(req: &ToolCallRequest) -> ToolCall {
    ToolCall {
        id: req.id.clone(),
        r#type: "function",
        function: FunctionCall {
            name: req.name.clone(),
            arguments: req.arguments.to_string(),
        },
    }
}

#[inline]
fn create_tool(tool: &ModelTool) -> Tool {
    Tool {
        r#type: "function",
        function: FunctionTool {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.parameters.clone(),
        },
    }
}

pub fn create_reply(completion: ChatCompletion) -> Result<ModelReply, Error> {
    let Some(choice) = completion.choices.into_iter().next() else {
        return Err(Error::new("completion has no choices", ErrorKind::Other));
    };

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("tool_calls") => ModelFinishReason::ToolCalls,
        Some("length") => ModelFinishReason::Length,
        Some("content_filter") => {
            return Err(Error::new(
                "reply was blocked by the content filter",
                ErrorKind::Moderated,
            ));
        }
        _ => ModelFinishReason::Stop,
    };

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(idx, tool_call)| {
            let function = tool_call.function.unwrap_or(ResponseFunctionCall {
                name: None,
                arguments: None,
            });
            ToolCallRequest {
                id: tool_call.id.unwrap_or_else(|| format!("call_{idx}")),
                name: function.name.unwrap_or_default(),
                arguments: parse_arguments(function.arguments.as_deref()),
            }
        })
        .collect();

    Ok(ModelReply {
        content: choice.message.content,
        tool_calls,
        finish_reason,
    })
}

/// Parses the JSON-encoded arguments of a tool call. Tools always take an
/// object, so anything else degrades to an empty one.
fn parse_arguments(arguments: Option<&str>) -> Value {
    let parsed = arguments
        .filter(|args| !args.trim().is_empty())
        .and_then(|args| match serde_json::from_str::<Value>(args) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("discarding malformed tool arguments: {err}");
                None
            }
        });
    match parsed {
        Some(value @ Value::Object(_)) => value,
        _ => Value::Object(Map::new()),
    }
}
