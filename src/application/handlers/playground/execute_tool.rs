//! ExecuteToolHandler - runs a tool's pure computation.
//!
//! Computation errors are values: the handler only fails on the access gate
//! or storage. The caller receives the rendered body either way.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::execution::{render, ComputationError, ExecutorRegistry};
use crate::domain::foundation::UserId;
use crate::domain::playground::{PlaygroundError, ToolLocator};

use super::ActiveToolResolver;

#[derive(Debug, Clone)]
pub struct ExecuteToolCommand {
    pub locator: ToolLocator,
    pub user_id: UserId,
    /// Request parameters, or why the body could not be read as parameters.
    pub input: Result<Value, ComputationError>,
}

pub struct ExecuteToolHandler {
    resolver: ActiveToolResolver,
    executors: Arc<ExecutorRegistry>,
}

impl ExecuteToolHandler {
    pub fn new(resolver: ActiveToolResolver, executors: Arc<ExecutorRegistry>) -> Self {
        Self {
            resolver,
            executors,
        }
    }

    pub async fn handle(&self, cmd: ExecuteToolCommand) -> Result<Value, PlaygroundError> {
        let tool = self.resolver.resolve(&cmd.locator).await?;

        let outcome = cmd
            .input
            .and_then(|input| self.executors.execute(&tool, &input));
        if let Err(e) = &outcome {
            tracing::debug!(slug = %tool.slug(), user_id = %cmd.user_id, error = %e, "Tool computation returned an error");
        }

        Ok(render(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::playground::{catalog, Tool};
    use serde_json::json;

    fn builtin(slug: &str) -> Tool {
        Tool::create(catalog::builtin(slug).unwrap().to_new_tool().unwrap()).unwrap()
    }

    async fn handler(tools: &[Tool]) -> ExecuteToolHandler {
        ExecuteToolHandler::new(
            ActiveToolResolver::new(store_with(tools).await),
            Arc::new(ExecutorRegistry::builtin()),
        )
    }

    fn command(locator: &str, input: Value) -> ExecuteToolCommand {
        ExecuteToolCommand {
            locator: ToolLocator::parse(locator),
            user_id: user("u1"),
            input: Ok(input),
        }
    }

    #[tokio::test]
    async fn runs_the_matching_executor() {
        let h = handler(&[builtin("color-palette")]).await;
        let body = h
            .handle(command("color-palette", json!({"base_color": "#FF0000"})))
            .await
            .unwrap();

        assert_eq!(body["palette"]["primary"], "#FF0000");
        assert_eq!(body["palette"]["complement"], "#00ffff");
    }

    #[tokio::test]
    async fn computation_errors_are_values() {
        let h = handler(&[builtin("json-formatter")]).await;
        let body = h
            .handle(command("json-formatter", json!({"json": "{\"invalid\": json}"})))
            .await
            .unwrap();

        assert_eq!(body["valid"], false);
        assert!(body["error"].is_string());
        assert!(body.get("size_original").is_none());
    }

    #[tokio::test]
    async fn unregistered_slug_is_not_implemented() {
        let h = handler(&[builtin("workout-tracker")]).await;
        let body = h.handle(command("workout-tracker", json!({}))).await.unwrap();
        assert_eq!(body, json!({"error": "Tool not implemented"}));
    }

    #[tokio::test]
    async fn uses_tool_configuration() {
        let mut counter = builtin("word-counter");
        counter
            .replace_configuration(json!({"max_text_length": 5}))
            .unwrap();
        let h = handler(&[counter]).await;

        let body = h
            .handle(command("word-counter", json!({"text": "far too long"})))
            .await
            .unwrap();
        assert!(body["error"].is_string());
        assert_eq!(body["max_text_length"], 5);
    }

    #[tokio::test]
    async fn inactive_tool_is_not_found() {
        let mut calculator = builtin("calculator");
        calculator.deactivate();
        let h = handler(&[calculator]).await;

        let err = h
            .handle(command("calculator", json!({"operation": "add", "num1": 1, "num2": 2})))
            .await
            .unwrap_err();
        assert!(matches!(err, PlaygroundError::NotFound(_)));
    }

    #[tokio::test]
    async fn unreadable_input_is_reported_as_a_value() {
        let h = handler(&[builtin("word-counter")]).await;
        let body = h
            .handle(ExecuteToolCommand {
                input: Err(ComputationError::new("Invalid JSON body")),
                ..command("word-counter", json!({}))
            })
            .await
            .unwrap();
        assert_eq!(body, json!({"error": "Invalid JSON body"}));
    }

    #[tokio::test]
    async fn unreadable_input_still_hides_inactive_tools() {
        let mut counter = builtin("word-counter");
        counter.deactivate();
        let h = handler(&[counter]).await;

        let err = h
            .handle(ExecuteToolCommand {
                input: Err(ComputationError::new("Invalid JSON body")),
                ..command("word-counter", json!({}))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PlaygroundError::NotFound(_)));
    }
}
