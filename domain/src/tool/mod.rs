//! Tool server request/result value objects
//!
//! The two external tool servers (repository research and documentation
//! generation) are opaque remote procedures. The gateway produces exactly
//! one immutable [`ToolResult`] per [`ToolRequest`]; all failures are
//! carried inside the result, never raised.

use crate::core::error::ClassifiedError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The external tool servers the assistant can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolServer {
    /// Repository research (repo URL + query).
    Research,
    /// Documentation generation (code text + doc type).
    DocGen,
}

impl ToolServer {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolServer::Research => "research",
            ToolServer::DocGen => "docgen",
        }
    }
}

impl std::fmt::Display for ToolServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ToolServer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "research" => Ok(ToolServer::Research),
            "docgen" => Ok(ToolServer::DocGen),
            other => Err(format!("unknown tool server: {}", other)),
        }
    }
}

/// A typed call to one tool server.
///
/// Parameters are named strings specific to that server — the gateway does
/// not interpret them, only forwards them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    pub server: ToolServer,
    pub params: BTreeMap<String, String>,
}

impl ToolRequest {
    pub fn new(server: ToolServer) -> Self {
        Self {
            server,
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// The normalized outcome of one tool call. Immutable once produced.
///
/// Either `data` is a non-empty structured payload (`ok == true`), or
/// `error` explains the failure (`ok == false`) — an empty success payload
/// is not representable, because it would be indistinguishable from
/// "no findings".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub server: ToolServer,
    pub ok: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<ClassifiedError>,
}

impl ToolResult {
    /// Create a successful result.
    ///
    /// An empty payload (null, `{}`, `[]`, or `""`) is classified as
    /// `ToolResponseInvalid` instead of being surfaced as success.
    pub fn success(server: ToolServer, data: serde_json::Value) -> Self {
        if Self::payload_is_empty(&data) {
            return Self::failure(
                server,
                ClassifiedError::tool_response_invalid(format!(
                    "{} server returned an empty success payload",
                    server
                )),
            );
        }
        Self {
            server,
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(server: ToolServer, error: ClassifiedError) -> Self {
        Self {
            server,
            ok: false,
            data: None,
            error: Some(error),
        }
    }

    fn payload_is_empty(data: &serde_json::Value) -> bool {
        match data {
            serde_json::Value::Null => true,
            serde_json::Value::String(s) => s.is_empty(),
            serde_json::Value::Array(a) => a.is_empty(),
            serde_json::Value::Object(o) => o.is_empty(),
            _ => false,
        }
    }

    /// Error summary suitable for inclusion in a model prompt — the message
    /// only, never raw transport internals.
    pub fn error_summary(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.message.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_payload() {
        let result = ToolResult::success(
            ToolServer::Research,
            serde_json::json!({"findings": ["a", "b"]}),
        );
        assert!(result.ok);
        assert!(result.error.is_none());
    }

    #[test]
    fn empty_object_payload_becomes_invalid() {
        let result = ToolResult::success(ToolServer::Research, serde_json::json!({}));
        assert!(!result.ok);
        assert_eq!(
            result.error.unwrap().kind,
            crate::core::error::ErrorKind::ToolResponseInvalid
        );
    }

    #[test]
    fn null_payload_becomes_invalid() {
        let result = ToolResult::success(ToolServer::DocGen, serde_json::Value::Null);
        assert!(!result.ok);
    }

    #[test]
    fn failure_carries_error() {
        let result = ToolResult::failure(
            ToolServer::DocGen,
            ClassifiedError::timeout("server took too long"),
        );
        assert!(!result.ok);
        assert_eq!(
            result.error_summary().as_deref(),
            Some("server took too long")
        );
    }

    #[test]
    fn tool_server_parse_round_trip() {
        assert_eq!("research".parse::<ToolServer>(), Ok(ToolServer::Research));
        assert_eq!("docgen".parse::<ToolServer>(), Ok(ToolServer::DocGen));
        assert!("other".parse::<ToolServer>().is_err());
    }

    #[test]
    fn request_builder_pattern() {
        let request = ToolRequest::new(ToolServer::Research)
            .with_param("repository_url", "https://github.com/acme/widgets")
            .with_param("query", "find security issues");
        assert_eq!(request.params.len(), 2);
    }
}
