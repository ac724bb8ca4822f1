//! Human-readable reports of a transcript.
//!
//! A [`Report`] has up to three sections, in this order:
//!
//! 1. every tool call, in transcript order and then call order within a
//!    message,
//! 2. the content of every non-empty tool result,
//! 3. the content of the last message, which is the final answer.
//!
//! Sections with nothing to show are left out. Building a report never
//! fails: absent content becomes an empty string and a call without a name
//! shows [`UNKNOWN_TOOL_NAME`].

use std::fmt::{self, Display};

use serde_json::Value;

use crate::transcript::{Role, ToolCall, Transcript};

/// Placeholder shown for tool calls that have no name.
pub const UNKNOWN_TOOL_NAME: &str = "<unknown>";

/// One tool call as shown in a report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCallLine {
    /// Name of the tool, or [`UNKNOWN_TOOL_NAME`].
    pub name: String,
    /// Arguments as a compact JSON object.
    pub arguments: String,
}

impl From<&ToolCall> for ToolCallLine {
    fn from(call: &ToolCall) -> Self {
        let name = if call.name().is_empty() {
            UNKNOWN_TOOL_NAME
        } else {
            call.name()
        };
        Self {
            name: name.to_owned(),
            arguments: Value::Object(call.arguments().clone()).to_string(),
        }
    }
}

impl Display for ToolCallLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

/// A line of a [`Report`], see [`Report::lines`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportLine<'a> {
    /// A tool invocation.
    ToolCall(&'a ToolCallLine),
    /// The output of a tool.
    ToolResponse(&'a str),
    /// The final answer.
    FinalReply(&'a str),
}

/// The rendered form of a [`Transcript`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    tool_calls: Vec<ToolCallLine>,
    tool_responses: Vec<String>,
    final_reply: Option<String>,
}

impl Report {
    /// Builds the report of `transcript` in a single pass.
    pub fn from_transcript(transcript: &Transcript) -> Self {
        let mut report = Self::default();
        for msg in transcript {
            report
                .tool_calls
                .extend(msg.tool_calls().iter().map(ToolCallLine::from));
            if msg.role() == Role::Tool && !msg.content().is_empty() {
                report.tool_responses.push(msg.content().to_owned());
            }
        }
        report.final_reply = transcript.final_reply().map(str::to_owned);
        report
    }

    /// Returns the tool call section.
    #[inline]
    pub fn tool_calls(&self) -> &[ToolCallLine] {
        &self.tool_calls
    }

    /// Returns the tool response section.
    #[inline]
    pub fn tool_responses(&self) -> &[String] {
        &self.tool_responses
    }

    /// Returns the final answer, `None` for an empty transcript.
    #[inline]
    pub fn final_reply(&self) -> Option<&str> {
        self.final_reply.as_deref()
    }

    /// Returns every line of the report, section by section.
    pub fn lines(&self) -> impl Iterator<Item = ReportLine<'_>> {
        let calls = self.tool_calls.iter().map(ReportLine::ToolCall);
        let responses = self
            .tool_responses
            .iter()
            .map(|content| ReportLine::ToolResponse(content));
        let final_reply = self.final_reply.as_deref().map(ReportLine::FinalReply);
        calls.chain(responses).chain(final_reply)
    }

    /// Returns `true` if the report has no lines at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tool_calls.is_empty()
            && self.tool_responses.is_empty()
            && self.final_reply.is_none()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.tool_calls.is_empty() {
            writeln!(f, "Tool calls:")?;
            for call in &self.tool_calls {
                writeln!(f, "  - {call}")?;
            }
        }
        if !self.tool_responses.is_empty() {
            writeln!(f, "Tool responses:")?;
            for content in &self.tool_responses {
                writeln!(f, "  - {content}")?;
            }
        }
        if let Some(final_reply) = &self.final_reply {
            writeln!(f, "{final_reply}")?;
        }
        Ok(())
    }
}

/// Renders `transcript` as plain text.
#[inline]
pub fn render(transcript: &Transcript) -> String {
    Report::from_transcript(transcript).to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, json};

    use super::*;
    use crate::transcript::Message;

    fn weather_transcript() -> Transcript {
        let mut city = Map::new();
        city.insert("city".to_owned(), json!("Seoul"));
        Transcript::from(vec![
            Message::user("What's the weather in Seoul?"),
            Message::assistant(
                None,
                [
                    ToolCall::new("call_1", "weather", city),
                    ToolCall::new("call_2", "time", Map::new()),
                ],
            ),
            Message::tool("call_1", "sunny, 22C"),
            Message::assistant(Some("It's sunny in Seoul.".to_owned()), []),
        ])
    }

    #[test]
    fn test_calls_responses_and_final_reply_in_order() {
        let report = Report::from_transcript(&weather_transcript());
        let lines = report.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert!(matches!(
            lines[0],
            ReportLine::ToolCall(ToolCallLine { name, arguments })
                if name == "weather" && arguments == r#"{"city":"Seoul"}"#
        ));
        assert!(matches!(
            lines[1],
            ReportLine::ToolCall(ToolCallLine { name, arguments })
                if name == "time" && arguments == "{}"
        ));
        assert_eq!(lines[2], ReportLine::ToolResponse("sunny, 22C"));
        assert_eq!(lines[3], ReportLine::FinalReply("It's sunny in Seoul."));

        assert_eq!(
            report.to_string(),
            "Tool calls:\n\
             \x20 - weather({\"city\":\"Seoul\"})\n\
             \x20 - time({})\n\
             Tool responses:\n\
             \x20 - sunny, 22C\n\
             It's sunny in Seoul.\n"
        );
    }

    #[test]
    fn test_no_tool_calls_omits_section() {
        let transcript = Transcript::from(vec![
            Message::user("Hi"),
            Message::assistant(Some("Hello!".to_owned()), []),
        ]);
        let report = Report::from_transcript(&transcript);
        assert!(report.tool_calls().is_empty());
        assert!(report.tool_responses().is_empty());
        assert_eq!(render(&transcript), "Hello!\n");
    }

    #[test]
    fn test_calls_without_responses() {
        let transcript = Transcript::from(vec![
            Message::user("Time?"),
            Message::assistant(None, [ToolCall::new("c", "time", Map::new())]),
        ]);
        let report = Report::from_transcript(&transcript);
        assert_eq!(report.tool_calls().len(), 1);
        assert!(report.tool_responses().is_empty());
        assert_eq!(report.final_reply(), Some(""));
        assert_eq!(render(&transcript), "Tool calls:\n  - time({})\n\n");
    }

    #[test]
    fn test_empty_transcript() {
        let report = Report::from_transcript(&Transcript::default());
        assert!(report.is_empty());
        assert_eq!(report.lines().count(), 0);
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let transcript: Transcript = serde_json::from_value(json!([
            { "role": "user" },
            { "role": "assistant", "tool_calls": [{ "arguments": { "x": 1 } }] },
            { "role": "tool", "content": "" },
            { "role": "tool", "content": null },
            { "role": "assistant", "content": null }
        ]))
        .unwrap();
        let report = Report::from_transcript(&transcript);
        assert_eq!(report.tool_calls()[0].name, UNKNOWN_TOOL_NAME);
        assert_eq!(report.tool_calls()[0].to_string(), r#"<unknown>({"x":1})"#);
        assert!(report.tool_responses().is_empty());
        assert_eq!(report.final_reply(), Some(""));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let transcript = weather_transcript();
        assert_eq!(render(&transcript), render(&transcript));
        assert_eq!(
            Report::from_transcript(&transcript),
            Report::from_transcript(&transcript)
        );
    }
}
