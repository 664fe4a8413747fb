//! Infrastructure layer for nova-assistant
//!
//! External adapters implementing the application ports: the Bedrock
//! runtime and control-plane clients, the MCP tool server gateway, and
//! configuration loading.

pub mod bedrock;
pub mod config;
pub mod mcp;

pub use bedrock::{BedrockConnection, BedrockInvoker, BedrockProfileDirectory, BedrockProfileResolver};
pub use config::{ConfigLoader, FileConfig};
pub use mcp::{McpToolGateway, ToolEndpoint};
