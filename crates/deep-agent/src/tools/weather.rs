use std::future::ready;

use deep_agent_core::tool::{Error as ToolError, Tool, ToolResult};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
pub struct GetWeatherToolParameters {
    #[schemars(description = "Name of the city, e.g. `Seoul`.")]
    city: String,
}

/// A tool that reports the weather of a city.
///
/// There is no weather service behind it, every city is sunny.
pub struct GetWeatherTool {
    parameter_schema: Value,
}

impl GetWeatherTool {
    /// Creates a new weather tool.
    #[inline]
    pub fn new() -> Self {
        GetWeatherTool {
            parameter_schema: schema_for!(GetWeatherToolParameters).to_value(),
        }
    }
}

impl Default for GetWeatherTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for GetWeatherTool {
    type Input = GetWeatherToolParameters;

    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        r#"
Return the current weather for the given city."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        input: GetWeatherToolParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let city = input.city.trim();
        let result = if city.is_empty() {
            Err(ToolError::invalid_input().with_reason("`city` must not be empty"))
        } else {
            Ok(format!("Weather in {city}: sunny, 22°C"))
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use deep_agent_core::tool::ErrorKind;

    use super::*;

    fn input(city: &str) -> GetWeatherToolParameters {
        GetWeatherToolParameters {
            city: city.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_weather() {
        let tool = GetWeatherTool::new();
        let result = tool.execute(input("Seoul")).await;
        assert_eq!(result.unwrap(), "Weather in Seoul: sunny, 22°C");

        let err = tool.execute(input("  ")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_schema() {
        let tool = GetWeatherTool::new();
        let schema = tool.parameter_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["city"]["type"], "string");
        assert_eq!(schema["required"][0], "city");
        assert_eq!(
            tool.definition().description,
            "Return the current weather for the given city."
        );
    }
}
