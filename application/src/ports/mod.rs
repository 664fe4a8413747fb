//! Ports (interfaces) implemented by the infrastructure layer.

pub mod model_invoker;
pub mod profile_resolver;
pub mod tool_gateway;

pub use model_invoker::{ModelInvoker, ReplyStream};
pub use profile_resolver::ProfileResolver;
pub use tool_gateway::ToolGateway;
