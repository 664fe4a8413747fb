//! Tool gateway over MCP stdio servers.
//!
//! Implements the application's [`ToolGateway`] port. Every failure mode
//! (missing configuration, spawn failure, call timeout, server-reported
//! error, unusable payload) is folded into the returned [`ToolResult`];
//! the gateway itself never fails outward.

use assistant_application::ToolGateway;
use assistant_domain::{ClassifiedError, ToolRequest, ToolResult, ToolServer};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::transport::StdioToolTransport;

/// How to reach one tool server: the process to spawn and the tool name to
/// invoke on it.
#[derive(Debug, Clone)]
pub struct ToolEndpoint {
    pub command: String,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    pub tool: String,
}

/// Gateway that lazily spawns one MCP server process per configured
/// [`ToolServer`] and reuses the connection across calls. A transport
/// failure evicts the connection so the next call respawns the server.
pub struct McpToolGateway {
    endpoints: HashMap<ToolServer, ToolEndpoint>,
    connections: Mutex<HashMap<ToolServer, Arc<StdioToolTransport>>>,
    call_timeout: Duration,
}

impl McpToolGateway {
    pub fn new(endpoints: HashMap<ToolServer, ToolEndpoint>, call_timeout: Duration) -> Self {
        Self {
            endpoints,
            connections: Mutex::new(HashMap::new()),
            call_timeout,
        }
    }

    async fn connection(
        &self,
        server: ToolServer,
    ) -> Result<Arc<StdioToolTransport>, ClassifiedError> {
        let endpoint = self.endpoints.get(&server).ok_or_else(|| {
            ClassifiedError::invalid_config(format!("no {} tool server configured", server))
        })?;

        let mut connections = self.connections.lock().await;
        if let Some(transport) = connections.get(&server) {
            return Ok(Arc::clone(transport));
        }

        info!(%server, command = %endpoint.command, "starting tool server");
        // The handshake gets the same bound as a call: a server that starts
        // but never answers `initialize` must not block the interaction.
        // Dropping the connect future kills the child via kill_on_drop.
        let transport = match tokio::time::timeout(
            self.call_timeout,
            StdioToolTransport::connect(&endpoint.command, &endpoint.args, &endpoint.env),
        )
        .await
        {
            Err(_) => {
                return Err(ClassifiedError::timeout(format!(
                    "{} server did not finish initializing within {}s",
                    server,
                    self.call_timeout.as_secs()
                )));
            }
            Ok(Err(e)) => {
                return Err(ClassifiedError::unknown(format!(
                    "{} server unavailable: {}",
                    server, e
                )));
            }
            Ok(Ok(transport)) => Arc::new(transport),
        };
        connections.insert(server, Arc::clone(&transport));
        Ok(transport)
    }

    async fn evict(&self, server: ToolServer) {
        self.connections.lock().await.remove(&server);
    }

    async fn call_inner(&self, request: &ToolRequest) -> Result<Value, ClassifiedError> {
        let server = request.server;
        let endpoint = self.endpoints.get(&server).ok_or_else(|| {
            ClassifiedError::invalid_config(format!("no {} tool server configured", server))
        })?;
        let transport = self.connection(server).await?;

        let params = json!({
            "name": endpoint.tool,
            "arguments": request.params,
        });

        let response = match tokio::time::timeout(
            self.call_timeout,
            transport.request("tools/call", params),
        )
        .await
        {
            Err(_) => {
                self.evict(server).await;
                return Err(ClassifiedError::timeout(format!(
                    "{} tool call exceeded {}s",
                    server,
                    self.call_timeout.as_secs()
                )));
            }
            Ok(Err(e)) => {
                self.evict(server).await;
                return Err(ClassifiedError::unknown(format!(
                    "{} server transport failure: {}",
                    server, e
                )));
            }
            Ok(Ok(response)) => response,
        };

        if let Some(error) = response.get("error") {
            let message = error["message"].as_str().unwrap_or("unspecified error");
            return Err(ClassifiedError::unknown(format!(
                "{} server reported: {}",
                server, message
            )));
        }

        match response.get("result") {
            Some(result) => Ok(normalize_tool_payload(result.clone())),
            None => Err(ClassifiedError::tool_response_invalid(format!(
                "{} server response carried neither result nor error",
                server
            ))),
        }
    }

    /// List the tool names a server advertises.
    pub async fn list_tools(&self, server: ToolServer) -> Result<Vec<String>, ClassifiedError> {
        let transport = self.connection(server).await?;
        let response = tokio::time::timeout(
            self.call_timeout,
            transport.request("tools/list", json!({})),
        )
        .await
        .map_err(|_| ClassifiedError::timeout(format!("{} tools/list timed out", server)))?
        .map_err(|e| {
            ClassifiedError::unknown(format!("{} server transport failure: {}", server, e))
        })?;

        let tools = response["result"]["tools"]
            .as_array()
            .ok_or_else(|| {
                ClassifiedError::tool_response_invalid(format!(
                    "{} server returned a malformed tools listing",
                    server
                ))
            })?
            .iter()
            .filter_map(|t| t["name"].as_str().map(str::to_string))
            .collect();
        Ok(tools)
    }
}

#[async_trait]
impl ToolGateway for McpToolGateway {
    async fn call(&self, request: &ToolRequest) -> ToolResult {
        match self.call_inner(request).await {
            Ok(payload) => ToolResult::success(request.server, payload),
            Err(e) => {
                warn!(server = %request.server, error = %e, "tool call failed");
                ToolResult::failure(request.server, e)
            }
        }
    }
}

/// Normalize an MCP `tools/call` result into a payload for prompting.
///
/// Servers wrap output in a `content` array of typed blocks. Text blocks
/// are unwrapped; a single text block holding JSON is parsed so the
/// structure survives into the prompt.
pub fn normalize_tool_payload(result: Value) -> Value {
    let Some(content) = result.get("content").and_then(Value::as_array) else {
        return result;
    };

    let texts: Vec<&str> = content
        .iter()
        .filter(|block| block["type"] == "text" || block.get("type").is_none())
        .filter_map(|block| block["text"].as_str())
        .collect();

    match texts.as_slice() {
        // A content wrapper with no text blocks carries nothing usable;
        // null trips the empty-payload check downstream.
        [] => Value::Null,
        [single] => serde_json::from_str(single)
            .unwrap_or_else(|_| Value::String((*single).to_string())),
        many => Value::String(many.join("\n")),
    }
}
