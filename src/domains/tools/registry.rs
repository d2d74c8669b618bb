//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry is built once at startup and is read-only afterwards, so it
//! can be shared between concurrent calls behind an `Arc`. Tools are listed in
//! registration order.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::descriptor::ToolDescriptor;
use super::error::{ToolError, ToolResult};
use super::handlers::{Arguments, ToolHandler};
use crate::core::error::{Error, Result};

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// Collects tools before freezing them into a [`ToolRegistry`].
#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Duplicate names are reported by [`build`](Self::build).
    pub fn register(mut self, descriptor: ToolDescriptor, handler: Arc<dyn ToolHandler>) -> Self {
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
        self
    }

    /// Freeze the registry. Fails if two tools share a name.
    pub fn build(self) -> Result<ToolRegistry> {
        let mut index = HashMap::with_capacity(self.tools.len());
        for (position, tool) in self.tools.iter().enumerate() {
            if index.insert(tool.descriptor.name, position).is_some() {
                return Err(Error::internal(format!(
                    "tool '{}' registered twice",
                    tool.descriptor.name
                )));
            }
        }

        debug!("Tool registry built with {} tools", self.tools.len());
        Ok(ToolRegistry {
            tools: self.tools,
            index,
        })
    }
}

/// Tool registry - the fixed set of tools this server exposes.
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::new()
    }

    /// Descriptors of all tools, in registration order.
    pub fn list_tools(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor).collect()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.descriptor.name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i].descriptor)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validate arguments, fill defaults and run the named tool.
    #[instrument(skip(self, arguments))]
    pub async fn invoke(&self, name: &str, arguments: Arguments) -> ToolResult<String> {
        let Some(tool) = self.index.get(name).map(|&i| &self.tools[i]) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::unknown_tool(name));
        };

        let arguments = tool.descriptor.validate_arguments(arguments).map_err(|e| {
            warn!("Rejected arguments for {}: {}", name, e);
            e
        })?;

        let result = tool.handler.call(arguments).await;
        if let Err(e) = &result {
            if !e.is_not_found() {
                warn!("Tool {} failed: {}", name, e);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::ads::types::{CustomerId, MatchType};
    use crate::domains::tools::descriptor::{ParamKind, ParamSpec};
    use schemars::JsonSchema;
    use serde_json::json;

    #[derive(serde::Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct EchoParams {
        customer_id: CustomerId,
        #[serde(default = "phrase")]
        match_type: MatchType,
    }

    fn phrase() -> MatchType {
        MatchType::Phrase
    }

    /// Echoes its normalized arguments back as JSON.
    struct Echo;

    #[async_trait::async_trait]
    impl ToolHandler for Echo {
        async fn call(&self, arguments: Arguments) -> ToolResult<String> {
            Ok(serde_json::Value::Object(arguments).to_string())
        }
    }

    fn echo_descriptor(name: &'static str) -> ToolDescriptor {
        ToolDescriptor::new::<EchoParams>(name, "Echo arguments")
            .param(ParamSpec::new("customer_id", ParamKind::CustomerId))
            .param(ParamSpec::new("match_type", ParamKind::MatchType).with_default("PHRASE"))
    }

    fn registry() -> ToolRegistry {
        ToolRegistry::builder()
            .register(echo_descriptor("first"), Arc::new(Echo))
            .register(echo_descriptor("second"), Arc::new(Echo))
            .build()
            .unwrap()
    }

    fn args(value: serde_json::Value) -> Arguments {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_registry_lists_in_registration_order() {
        let registry = registry();
        assert_eq!(registry.tool_names(), vec!["first", "second"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("second").is_some());
        assert!(registry.get("third").is_none());
    }

    #[test]
    fn test_duplicate_names_fail_build() {
        let result = ToolRegistry::builder()
            .register(echo_descriptor("same"), Arc::new(Echo))
            .register(echo_descriptor("same"), Arc::new(Echo))
            .build();
        assert!(matches!(result, Err(Error::Internal(_))));
    }

    #[tokio::test]
    async fn test_invoke_fills_defaults() {
        let text = registry()
            .invoke("first", args(json!({ "customer_id": "123-456", "unused": 1 })))
            .await
            .unwrap();
        let echoed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(echoed, json!({ "customer_id": "123-456", "match_type": "PHRASE" }));
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let err = registry().invoke("missing", Arguments::new()).await.unwrap_err();
        assert_eq!(err, ToolError::UnknownTool("missing".to_string()));
    }

    #[tokio::test]
    async fn test_invoke_rejects_invalid_arguments() {
        let err = registry()
            .invoke("first", args(json!({ "customer_id": "123", "match_type": "FUZZY" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
