//! Domains module containing business logic organized by bounded contexts.
//!
//! - **ads**: Google Ads platform model, GAQL and mutation builders, value
//!   codec and the service interfaces the tools call through
//! - **tools**: the MCP tools, their registry and result formatting

pub mod ads;
pub mod tools;
