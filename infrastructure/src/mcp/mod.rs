//! MCP tool server integration: stdio transport and the gateway adapter.

pub mod gateway;
pub mod transport;

pub use gateway::{McpToolGateway, ToolEndpoint};
pub use transport::{StdioToolTransport, TransportError};
