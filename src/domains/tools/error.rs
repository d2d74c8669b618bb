//! Tool-specific error types.
//!
//! Every failure a tool call can produce falls into one of these variants.
//! All of them end the invocation; none are retried.

use thiserror::Error;

/// A specialized Result type for tool operations.
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// Errors that can occur during tool operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    /// The requested tool was never registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Caller input failed validation. Never reaches the platform.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The credential bundle is unavailable.
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// The platform rejected the request. Messages are kept verbatim, in order.
    #[error("Google Ads API error: {}", .0.join("; "))]
    Platform(Vec<String>),

    /// A lookup for a specific entity returned no rows.
    #[error("{0}")]
    NotFound(String),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "configuration missing" error.
    pub fn configuration_missing(msg: impl Into<String>) -> Self {
        Self::ConfigurationMissing(msg.into())
    }

    /// Create a platform error carrying a single message.
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(vec![msg.into()])
    }

    /// Create a new "not found" error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Whether this is a valid empty result rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Render the error as the text returned to the caller.
    pub fn render(&self) -> String {
        match self {
            Self::Platform(messages) => {
                let mut text = String::from("Google Ads API Error:");
                for message in messages {
                    text.push_str("\nError: ");
                    text.push_str(message);
                }
                text
            }
            other => other.to_string(),
        }
    }
}
