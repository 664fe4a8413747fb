//! Tool gateway port
//!
//! A single typed call to one of the external tool servers. The gateway
//! never fails outward: every failure — spawn error, timeout, malformed
//! payload — is wrapped into the returned [`ToolResult`], so a tool outage
//! degrades the composed answer instead of aborting the interaction.

use assistant_domain::{ToolRequest, ToolResult};
use async_trait::async_trait;

#[async_trait]
pub trait ToolGateway: Send + Sync {
    /// Issue one call and normalize whatever comes back.
    async fn call(&self, request: &ToolRequest) -> ToolResult;
}
