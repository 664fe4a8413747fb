//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file and
//! carry the built-in defaults. Conversion into validated domain values
//! happens through the accessor methods, never during deserialization.

use crate::mcp::ToolEndpoint;
use assistant_application::ModelSelection;
use assistant_domain::{ClassifiedError, GenerationConfig, ModelFamily, ToolServer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// AWS endpoint settings
    pub aws: FileAwsConfig,
    /// Generation parameter defaults
    pub generation: FileGenerationConfig,
    /// Timeouts and retry pacing
    pub limits: FileLimitsConfig,
    /// Tool server processes
    pub servers: FileServersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAwsConfig {
    pub region: String,
    /// Named credentials profile; `None` uses the default chain.
    pub profile: Option<String>,
    /// Explicit inference-profile identifier, used verbatim when set.
    pub inference_profile: Option<String>,
    /// Model family name, e.g. `nova-pro` or a full custom identifier.
    pub model_family: String,
}

impl Default for FileAwsConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            profile: None,
            inference_profile: None,
            model_family: "nova-pro".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: assistant_domain::generation::DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: assistant_domain::generation::DEFAULT_TEMPERATURE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLimitsConfig {
    pub request_timeout_secs: u64,
    pub tool_timeout_secs: u64,
    pub retry_delay_ms: u64,
}

impl Default for FileLimitsConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 60,
            tool_timeout_secs: 120,
            retry_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServersConfig {
    pub research: FileServerConfig,
    pub docgen: FileServerConfig,
}

impl Default for FileServersConfig {
    fn default() -> Self {
        Self {
            research: FileServerConfig {
                command: "uvx".to_string(),
                args: vec!["awslabs.git-repo-research-mcp-server@latest".to_string()],
                env: default_server_env(),
                tool: "search_repository".to_string(),
            },
            docgen: FileServerConfig {
                command: "uvx".to_string(),
                args: vec!["awslabs.code-doc-gen-mcp-server@latest".to_string()],
                env: default_server_env(),
                tool: "generate_documentation".to_string(),
            },
        }
    }
}

/// One tool server process definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub command: String,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    /// Name of the tool to invoke on this server.
    pub tool: String,
}

fn default_server_env() -> HashMap<String, String> {
    HashMap::from([("FASTMCP_LOG_LEVEL".to_string(), "ERROR".to_string())])
}

impl FileConfig {
    /// Validated generation parameters.
    pub fn generation(&self) -> Result<GenerationConfig, ClassifiedError> {
        GenerationConfig::new(self.generation.max_output_tokens, self.generation.temperature)
    }

    /// Model family plus optional explicit profile override.
    pub fn model_selection(&self) -> ModelSelection {
        let family: ModelFamily = self
            .aws
            .model_family
            .parse()
            .unwrap_or(ModelFamily::NovaPro);
        match &self.aws.inference_profile {
            Some(id) if !id.is_empty() => {
                ModelSelection::new(family).with_override(id.clone())
            }
            _ => ModelSelection::new(family),
        }
    }

    /// Tool server endpoints keyed by server identity.
    pub fn tool_endpoints(&self) -> HashMap<ToolServer, ToolEndpoint> {
        HashMap::from([
            (ToolServer::Research, endpoint(&self.servers.research)),
            (ToolServer::DocGen, endpoint(&self.servers.docgen)),
        ])
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.limits.request_timeout_secs)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.limits.tool_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.limits.retry_delay_ms)
    }
}

fn endpoint(server: &FileServerConfig) -> ToolEndpoint {
    ToolEndpoint {
        command: server.command.clone(),
        args: server.args.clone(),
        env: server.env.clone(),
        tool: server.tool.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_baseline() {
        let config = FileConfig::default();
        assert_eq!(config.aws.region, "us-east-1");
        assert_eq!(config.generation.max_output_tokens, 4000);
        assert_eq!(config.generation.temperature, 0.7);
        assert_eq!(config.limits.request_timeout_secs, 60);
        assert_eq!(config.servers.research.command, "uvx");
        assert_eq!(
            config.servers.research.env.get("FASTMCP_LOG_LEVEL"),
            Some(&"ERROR".to_string())
        );
    }

    #[test]
    fn default_selection_is_nova_pro_without_override() {
        let selection = FileConfig::default().model_selection();
        assert_eq!(selection.family, ModelFamily::NovaPro);
        assert!(selection.profile_override.is_none());
    }

    #[test]
    fn explicit_inference_profile_becomes_the_override() {
        let mut config = FileConfig::default();
        config.aws.inference_profile = Some("us.amazon.nova-pro-v1:0".to_string());
        let selection = config.model_selection();
        assert_eq!(
            selection.profile_override.as_deref(),
            Some("us.amazon.nova-pro-v1:0")
        );
    }

    #[test]
    fn out_of_range_temperature_is_rejected_on_access() {
        let mut config = FileConfig::default();
        config.generation.temperature = 3.5;
        assert!(config.generation().is_err());
    }

    #[test]
    fn endpoints_cover_both_servers() {
        let endpoints = FileConfig::default().tool_endpoints();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(
            endpoints[&ToolServer::DocGen].tool,
            "generate_documentation"
        );
    }
}
