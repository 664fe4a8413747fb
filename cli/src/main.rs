//! CLI entrypoint for nova-assistant
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod args;
mod output;

use anyhow::{Result, anyhow};
use args::{Cli, Command};
use assistant_application::{
    ModelSelection, RunChatUseCase, RunDocGenUseCase, RunResearchUseCase,
};
use assistant_application::use_cases::{DocGenInput, ResearchInput};
use assistant_domain::{
    ClassifiedError, Conversation, GenerationConfig, StreamEvent, ToolServer,
};
use assistant_infrastructure::{
    BedrockConnection, BedrockInvoker, BedrockProfileDirectory, BedrockProfileResolver,
    ConfigLoader, FileConfig, McpToolGateway,
};
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    apply_overrides(&mut config, &cli);

    if let Err(e) = run(&cli, &config).await {
        eprintln!("error: {}", e);
        eprintln!("  {}", e.advice());
        std::process::exit(1);
    }
    Ok(())
}

/// Fold command-line overrides into the loaded configuration.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(region) = &cli.region {
        config.aws.region = region.clone();
    }
    if let Some(profile) = &cli.profile {
        config.aws.profile = Some(profile.clone());
    }
    if let Some(model) = &cli.model {
        config.aws.model_family = model.clone();
    }
    if let Some(id) = &cli.inference_profile {
        config.aws.inference_profile = Some(id.clone());
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.generation.max_output_tokens = max_tokens;
    }
    if let Some(temperature) = cli.temperature {
        config.generation.temperature = temperature;
    }
}

async fn run(cli: &Cli, config: &FileConfig) -> std::result::Result<(), ClassifiedError> {
    let generation = apply_generation_params(config.generation()?, &cli.r#gen)?;
    let selection = config.model_selection();

    // === Dependency Injection ===
    let connection =
        BedrockConnection::connect(&config.aws.region, config.aws.profile.as_deref()).await;
    info!(region = %connection.region, "connected to Bedrock");

    let resolver = Arc::new(BedrockProfileResolver::new(
        BedrockProfileDirectory::new(connection.control.clone()),
        connection.region.clone(),
    ));
    let invoker = Arc::new(BedrockInvoker::new(
        connection.runtime.clone(),
        config.request_timeout(),
        config.retry_delay(),
    ));
    // Tool servers are spawned lazily, so building the gateway up front
    // costs nothing for the chat flow.
    let tools = Arc::new(McpToolGateway::new(
        config.tool_endpoints(),
        config.tool_timeout(),
    ));

    match &cli.command {
        Command::Research { repo, query } => {
            let use_case = RunResearchUseCase::new(tools, resolver, invoker);
            let answer = use_case
                .execute(ResearchInput {
                    repository_url: repo.clone(),
                    query: query.clone(),
                    selection,
                    generation,
                })
                .await?;
            println!("{}", output::format_answer(&answer));
        }
        Command::Document {
            file,
            code,
            doc_type,
        } => {
            let code = read_code(file.as_deref(), code.as_deref())?;
            let use_case = RunDocGenUseCase::new(tools, resolver, invoker);
            let answer = use_case
                .execute(DocGenInput {
                    code,
                    doc_type: doc_type.clone(),
                    selection,
                    generation,
                })
                .await?;
            println!("{}", output::format_answer(&answer));
        }
        Command::Chat { message, stream } => {
            let use_case = RunChatUseCase::new(resolver, invoker);
            let mut conversation = Conversation::new();
            if *stream {
                stream_chat(&use_case, &mut conversation, message, &selection, &generation)
                    .await?;
            } else {
                let answer = use_case
                    .execute(&mut conversation, message.clone(), &selection, &generation)
                    .await?;
                println!("{}", output::format_answer(&answer));
            }
        }
        Command::Tools => {
            for server in [ToolServer::Research, ToolServer::DocGen] {
                match tools.list_tools(server).await {
                    Ok(names) => {
                        println!("[{}]", server);
                        for name in names {
                            println!("  {}", name);
                        }
                    }
                    Err(e) => println!("[{}] unavailable: {}", server, e),
                }
            }
        }
    }
    Ok(())
}

async fn stream_chat(
    use_case: &RunChatUseCase,
    conversation: &mut Conversation,
    message: &str,
    selection: &ModelSelection,
    generation: &GenerationConfig,
) -> std::result::Result<(), ClassifiedError> {
    let mut stream = use_case
        .execute_streaming(conversation, message.to_string(), selection, generation)
        .await?;

    let mut stdout = std::io::stdout();
    while let Some(event) = stream.next_event().await {
        match event {
            StreamEvent::Delta(chunk) => {
                print!("{}", chunk);
                let _ = stdout.flush();
            }
            StreamEvent::Completed(_) => break,
            StreamEvent::Error(e) => {
                println!();
                return Err(e);
            }
        }
    }
    println!();
    Ok(())
}

/// Overlay loose `--gen key=value` pairs on the effective generation
/// configuration. Unrecognized keys and unparseable values are rejected
/// locally through the closed-key constructor.
fn apply_generation_params(
    base: GenerationConfig,
    pairs: &[String],
) -> std::result::Result<GenerationConfig, ClassifiedError> {
    if pairs.is_empty() {
        return Ok(base);
    }
    let mut params = std::collections::BTreeMap::new();
    params.insert(
        "max_output_tokens".to_string(),
        base.max_output_tokens.to_string(),
    );
    params.insert("temperature".to_string(), base.temperature.to_string());
    for pair in pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            ClassifiedError::invalid_config(format!(
                "generation parameter '{}' must be key=value",
                pair
            ))
        })?;
        params.insert(key.trim().to_string(), value.trim().to_string());
    }
    GenerationConfig::from_params(&params)
}

fn read_code(
    file: Option<&std::path::Path>,
    code: Option<&str>,
) -> std::result::Result<String, ClassifiedError> {
    match (file, code) {
        (Some(path), _) => std::fs::read_to_string(path).map_err(|e| {
            ClassifiedError::invalid_config(format!("cannot read {}: {}", path.display(), e))
        }),
        (None, Some(code)) => Ok(code.to_string()),
        (None, None) => Err(ClassifiedError::invalid_config(
            "document requires either --file or --code",
        )),
    }
}
