//! Tool handler trait and call results.
//!
//! Every tool in `definitions/` implements [`ToolHandler`]. The registry
//! validates arguments against the tool's descriptor before calling it, so a
//! handler only has to deserialize them into its typed params.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{ToolError, ToolResult};

/// Named arguments of a tool call.
pub type Arguments = serde_json::Map<String, serde_json::Value>;

/// Output from a tool execution, as shown to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Text returned to the caller.
    pub text: String,

    /// Whether the text describes a failure.
    pub is_error: bool,
}

impl ToolOutput {
    /// Create a successful tool output.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Create a failed tool output.
    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// Map an invocation result to caller-facing output.
    ///
    /// `NotFound` is a valid empty answer and renders as success. An unknown
    /// tool is a protocol-level fault and is handed back unchanged.
    pub fn from_result(result: ToolResult<String>) -> Result<Self, ToolError> {
        match result {
            Ok(text) => Ok(Self::success(text)),
            Err(err @ ToolError::UnknownTool(_)) => Err(err),
            Err(ToolError::NotFound(message)) => Ok(Self::success(message)),
            Err(err) => Ok(Self::failure(err.render())),
        }
    }
}

/// Trait implemented by every tool.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with validated, default-filled arguments.
    async fn call(&self, arguments: Arguments) -> ToolResult<String>;
}

/// Deserialize validated arguments into a tool's params struct.
pub fn parse_arguments<P: DeserializeOwned>(arguments: Arguments) -> ToolResult<P> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Implement [`ToolHandler`] for a tool exposing `execute(&self, Params)`.
macro_rules! impl_tool_handler {
    ($tool:ty, $params:ty) => {
        #[async_trait::async_trait]
        impl $crate::domains::tools::handlers::ToolHandler for $tool {
            async fn call(
                &self,
                arguments: $crate::domains::tools::handlers::Arguments,
            ) -> $crate::domains::tools::error::ToolResult<String> {
                let params: $params =
                    $crate::domains::tools::handlers::parse_arguments(arguments)?;
                self.execute(params).await
            }
        }
    };
}

pub(crate) use impl_tool_handler;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Params {
        name: String,
        #[serde(default)]
        count: Option<u32>,
    }

    #[test]
    fn test_parse_arguments() {
        let args = json!({ "name": "Spring", "count": 3 }).as_object().cloned().unwrap();
        let params: Params = parse_arguments(args).unwrap();
        assert_eq!(params.name, "Spring");
        assert_eq!(params.count, Some(3));

        let args = json!({ "count": 3 }).as_object().cloned().unwrap();
        let err = parse_arguments::<Params>(args).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_output_from_result() {
        assert_eq!(
            ToolOutput::from_result(Ok("done".to_string())).unwrap(),
            ToolOutput::success("done")
        );
        assert_eq!(
            ToolOutput::from_result(Err(ToolError::not_found("No ads found."))).unwrap(),
            ToolOutput::success("No ads found.")
        );

        let output =
            ToolOutput::from_result(Err(ToolError::platform("Budget amount is too low.")))
                .unwrap();
        assert!(output.is_error);
        assert_eq!(output.text, "Google Ads API Error:\nError: Budget amount is too low.");

        let err = ToolOutput::from_result(Err(ToolError::unknown_tool("nope"))).unwrap_err();
        assert_eq!(err, ToolError::UnknownTool("nope".to_string()));
    }

    struct Greeter;

    impl Greeter {
        async fn execute(&self, params: Params) -> ToolResult<String> {
            Ok(format!("{} x{}", params.name, params.count.unwrap_or(1)))
        }
    }

    impl_tool_handler!(Greeter, Params);

    #[test]
    fn test_macro_parses_then_executes() {
        let args = json!({ "name": "Spring" }).as_object().cloned().unwrap();
        let text = tokio_test::block_on(Greeter.call(args)).unwrap();
        assert_eq!(text, "Spring x1");

        let args = json!({ "name": 7 }).as_object().cloned().unwrap();
        let err = tokio_test::block_on(Greeter.call(args)).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
