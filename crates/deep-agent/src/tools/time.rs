use std::future::ready;

use chrono::{DateTime, Local, TimeZone, Utc};
use deep_agent_core::tool::{Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

#[derive(Deserialize, JsonSchema)]
pub struct GetCurrentTimeToolParameters {
    #[schemars(description = "Report the time in UTC instead of local time.")]
    #[serde(default)]
    utc: bool,
}

/// A tool that reports the current date and time.
pub struct GetCurrentTimeTool {
    parameter_schema: Value,
}

impl GetCurrentTimeTool {
    /// Creates a new time tool.
    #[inline]
    pub fn new() -> Self {
        GetCurrentTimeTool {
            parameter_schema: schema_for!(GetCurrentTimeToolParameters)
                .to_value(),
        }
    }
}

impl Default for GetCurrentTimeTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for GetCurrentTimeTool {
    type Input = GetCurrentTimeToolParameters;

    fn name(&self) -> &str {
        "get_current_time"
    }

    fn description(&self) -> &str {
        r#"
Return the current date and time with the UTC offset. Local time is used
unless `utc` is set."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: GetCurrentTimeToolParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let now = if input.utc {
            format_time(&Utc::now())
        } else {
            format_time(&Local::now())
        };
        ready(Ok(format!("Current time: {now}")))
    }
}

fn format_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(TIME_FORMAT).to_string()
}
