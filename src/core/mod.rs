//! Core module containing shared infrastructure components.
//!
//! Configuration, the credential bundle, process-level errors, the MCP server
//! handler and the transports it runs on.

pub mod config;
pub mod credentials;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
