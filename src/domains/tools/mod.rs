//! Tools domain module.
//!
//! Tools are the operations MCP clients call. This module owns the dispatch
//! side of the server:
//!
//! - `definitions/` - the Google Ads tools, one file per tool family
//! - `descriptor.rs` - typed parameter lists, input schemas, argument checks
//! - `registry.rs` - immutable name-to-handler map built at startup
//! - `handlers.rs` - the `ToolHandler` trait and caller-facing output
//! - `format.rs` - report rendering shared by the tools
//! - `error.rs` - the tool error taxonomy
//!
//! ## Adding a New Tool
//!
//! 1. Add a params struct and tool struct to the matching file in `definitions/`
//! 2. Give it `NAME`, `DESCRIPTION`, `descriptor()` and `execute()`
//! 3. Implement `ToolHandler` with `impl_tool_handler!`
//! 4. Register it in `definitions::register_all`

pub mod definitions;
pub mod descriptor;
mod error;
pub mod format;
mod handlers;
mod registry;

pub use definitions::register_all;
pub use descriptor::{ParamKind, ParamSpec, ToolDescriptor};
pub use error::{ToolError, ToolResult};
pub use handlers::{Arguments, ToolHandler, ToolOutput, parse_arguments};
pub use registry::{ToolRegistry, ToolRegistryBuilder};
