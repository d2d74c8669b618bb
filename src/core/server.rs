//! MCP Server implementation and lifecycle management.
//!
//! [`McpServer`] owns the tool registry and answers `tools/list` and
//! `tools/call`. Tool definitions live in `domains/tools/definitions/`;
//! adding a tool does not require touching this file.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::config::Config;
use super::credentials::Credentials;
use super::error::Result;
use crate::domains::ads::{AdsContext, AdsDefaults, RestAdsClient};
use crate::domains::tools::{
    Arguments, ToolDescriptor, ToolError, ToolOutput, ToolRegistry, register_all,
};

const INSTRUCTIONS: &str = "Google Ads management tools. Every tool takes a \
customer_id (dashes optional). Campaigns are created paused; money is in the \
account currency.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Every registered tool, built once at startup.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a server talking to the Google Ads REST API.
    ///
    /// A missing or incomplete credential bundle does not stop the server:
    /// tools stay listed and each call reports the configuration problem.
    pub fn new(config: Config) -> Result<Self> {
        let defaults = AdsDefaults::from_config(&config.ads);

        let ads = match Credentials::discover(config.ads.credentials_path.as_deref()) {
            Ok((credentials, _path)) => {
                let client = Arc::new(RestAdsClient::new(credentials, &config.ads));
                AdsContext::new(client.clone(), client, defaults)
            }
            Err(e) => {
                warn!("Google Ads credentials unavailable: {}", e);
                AdsContext::unconfigured(e.to_string(), defaults)
            }
        };

        Self::with_context(config, ads)
    }

    /// Create a server over an explicit platform context.
    pub fn with_context(config: Config, ads: AdsContext) -> Result<Self> {
        let registry = register_all(ToolRegistry::builder(), ads).build()?;
        info!("Registered {} tools", registry.len());

        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Server instructions sent on initialize.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    /// Invoke a tool and map the outcome to caller-facing output.
    ///
    /// Only an unknown tool name is an `Err`; every other failure is carried
    /// in the output text.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Arguments,
    ) -> std::result::Result<ToolOutput, ToolError> {
        info!("Calling tool: {}", name);
        ToolOutput::from_result(self.registry.invoke(name, arguments).await)
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools as MCP JSON (for HTTP transport).
    pub fn list_tools_json(&self) -> Vec<Value> {
        self.registry
            .list_tools()
            .into_iter()
            .map(|d| {
                serde_json::json!({
                    "name": d.name,
                    "description": d.description,
                    "inputSchema": d.input_schema()
                })
            })
            .collect()
    }

    /// Call a tool by name and return an MCP `CallToolResult` (for HTTP transport).
    pub async fn call_tool_json(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> std::result::Result<Value, String> {
        let arguments = match arguments {
            None | Some(Value::Null) => Arguments::new(),
            Some(Value::Object(map)) => map,
            Some(_) => return Err("arguments must be an object".to_string()),
        };

        let output = self.dispatch(name, arguments).await.map_err(|e| e.to_string())?;
        Ok(serde_json::json!({
            "content": [{ "type": "text", "text": output.text }],
            "isError": output.is_error
        }))
    }
}

fn to_mcp_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.name,
        descriptor.description,
        descriptor.shared_schema(),
    )
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.registry.list_tools().into_iter().map(to_mcp_tool).collect(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        let output = self
            .dispatch(&request.name, arguments)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let content = vec![Content::text(output.text)];
        Ok(if output.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        })
    }
}
