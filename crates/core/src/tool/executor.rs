use std::future::ready;
use std::pin::Pin;
use std::sync::Arc;

use deep_agent_model::{ModelTool, ToolCallRequest};

use crate::tool::{Error, ToolObject, ToolResult};

/// An executor that handles tool call requests from the model.
///
/// Tools keep their registration order, which is also the order they are
/// advertised to the model in.
pub struct Executor {
    tools: Vec<Arc<dyn ToolObject>>,
}

impl Executor {
    pub fn with_tools(tools: Vec<Arc<dyn ToolObject>>) -> Self {
        let mut deduped: Vec<Arc<dyn ToolObject>> =
            Vec::with_capacity(tools.len());
        for tool in tools {
            match deduped.iter_mut().find(|t| t.name() == tool.name()) {
                Some(existing) => {
                    warn!("tool registered twice, keeping the last: {}", tool.name());
                    *existing = tool;
                }
                None => deduped.push(tool),
            }
        }
        Self { tools: deduped }
    }

    #[inline]
    pub fn definitions(&self) -> Vec<ModelTool> {
        self.tools.iter().map(|tool| tool.definition()).collect()
    }

    pub fn execute(
        &self,
        req: &ToolCallRequest,
    ) -> Pin<Box<dyn Future<Output = ToolResult> + Send>> {
        let Some(tool) = self.tools.iter().find(|t| t.name() == req.name)
        else {
            warn!("tool not found: {}", req.name);
            return Box::pin(ready(Err(Error::not_found()
                .with_reason(format!("tool not found: {}", req.name)))));
        };
        trace!("running a tool ({}) with args: {:?}", req.id, req.arguments);
        Arc::clone(tool).execute(req.arguments.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::{Value, json};

    use super::*;
    use crate::tool::{ErrorKind, Tool, ToolObjectImpl};

    static EMPTY_SCHEMA: &Value = &Value::Null;

    #[derive(Deserialize)]
    struct GreetInput {
        name: String,
    }

    struct GreetTool(&'static str);

    impl Tool for GreetTool {
        type Input = GreetInput;

        fn name(&self) -> &str {
            "greet"
        }

        fn description(&self) -> &str {
            "Greets someone."
        }

        fn parameter_schema(&self) -> &Value {
            EMPTY_SCHEMA
        }

        fn execute(
            &self,
            input: Self::Input,
        ) -> impl Future<Output = ToolResult> + Send + 'static {
            ready(Ok(format!("{}, {}!", self.0, input.name)))
        }
    }

    fn request(name: &str, arguments: Value) -> ToolCallRequest {
        ToolCallRequest {
            id: "tool:1".to_owned(),
            name: name.to_owned(),
            arguments,
        }
    }

    #[tokio::test]
    async fn test_execute() {
        let executor =
            Executor::with_tools(vec![Arc::new(ToolObjectImpl(GreetTool("Hi")))]);

        let result = executor
            .execute(&request("greet", json!({ "name": "Seoul" })))
            .await;
        assert_eq!(result.unwrap(), "Hi, Seoul!");

        // Test with non-existent tool.
        let err = executor
            .execute(&request("read_file", json!({})))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        // Test with arguments that don't fit the input type.
        let err = executor
            .execute(&request("greet", json!({ "who": 1 })))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let executor = Executor::with_tools(vec![
            Arc::new(ToolObjectImpl(GreetTool("Hi"))),
            Arc::new(ToolObjectImpl(GreetTool("Hello"))),
        ]);
        assert_eq!(executor.definitions().len(), 1);

        let result = executor
            .execute(&request("greet", json!({ "name": "there" })))
            .await;
        assert_eq!(result.unwrap(), "Hello, there!");
    }
}
