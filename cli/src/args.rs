//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "nova-assistant", version, about = "Repository research and documentation assistant backed by Bedrock")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Explicit config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip config files and use built-in defaults
    #[arg(long, global = true)]
    pub no_config: bool,

    /// AWS region override
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// AWS credentials profile override
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Model family (nova-pro, nova-lite, nova-micro, or a full identifier)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Inference profile identifier, used verbatim instead of resolving
    #[arg(long, global = true)]
    pub inference_profile: Option<String>,

    /// Maximum output tokens
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature in [0, 1]
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// Loose generation parameter, `key=value` (repeatable); unrecognized
    /// keys are rejected before any network call
    #[arg(long = "gen", value_name = "KEY=VALUE", global = true)]
    pub r#gen: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a repository and answer a question about it
    Research {
        /// Repository URL to analyze
        #[arg(long)]
        repo: String,
        /// What to investigate
        query: String,
    },
    /// Generate and enhance documentation for code
    Document {
        /// Read the code from this file
        #[arg(long, conflicts_with = "code")]
        file: Option<PathBuf>,
        /// Code text given inline
        #[arg(long)]
        code: Option<String>,
        /// Documentation type (api, readme, inline, tutorial)
        #[arg(long, default_value = "api")]
        doc_type: String,
    },
    /// Send a single chat message
    Chat {
        message: String,
        /// Print the response incrementally as it is generated
        #[arg(long)]
        stream: bool,
    },
    /// List the tools each configured server advertises
    Tools,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn research_parses_repo_and_query() {
        let cli = Cli::parse_from([
            "nova-assistant",
            "research",
            "--repo",
            "https://github.com/acme/widgets",
            "what does the parser do",
        ]);
        match cli.command {
            Command::Research { repo, query } => {
                assert_eq!(repo, "https://github.com/acme/widgets");
                assert_eq!(query, "what does the parser do");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn document_defaults_to_api_doc_type() {
        let cli = Cli::parse_from(["nova-assistant", "document", "--code", "fn main() {}"]);
        match cli.command {
            Command::Document { doc_type, .. } => assert_eq!(doc_type, "api"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn gen_flag_repeats_into_a_list() {
        let cli = Cli::parse_from([
            "nova-assistant",
            "chat",
            "hello",
            "--gen",
            "temperature=0.2",
            "--gen",
            "max_output_tokens=1024",
        ]);
        assert_eq!(cli.r#gen, ["temperature=0.2", "max_output_tokens=1024"]);
    }

    #[test]
    fn verbosity_accumulates() {
        let cli = Cli::parse_from(["nova-assistant", "-vv", "chat", "hello"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn global_overrides_apply_after_the_subcommand() {
        let cli = Cli::parse_from([
            "nova-assistant",
            "chat",
            "hello",
            "--region",
            "eu-west-1",
            "--model",
            "nova-lite",
        ]);
        assert_eq!(cli.region.as_deref(), Some("eu-west-1"));
        assert_eq!(cli.model.as_deref(), Some("nova-lite"));
    }
}
