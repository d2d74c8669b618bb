//! Google Ads MCP Server Library
//!
//! Exposes Google Ads campaign, ad group, ad, keyword and reporting
//! operations as Model Context Protocol tools.
//!
//! # Architecture
//!
//! - **core**: configuration, credential loading, errors, the MCP server
//!   handler and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **ads**: GAQL queries, mutations, value codec, platform services
//!   - **tools**: tool descriptors, registry, definitions and formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use google_ads_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
