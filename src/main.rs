use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use contentcraft::llm::{GroqClient, LlmClient};
use contentcraft::tools::ToolRegistry;
use contentcraft::{Dispatcher, Envelope};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("contentcraft")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("contentcraft.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Load `.env` from the working directory or its parents, without
/// overriding variables already set
fn load_env_file() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from: {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    }
}

fn build_dispatcher(config: &Config) -> Result<Dispatcher> {
    let client = GroqClient::new(config.groq_config()).context("Failed to create completion client")?;
    if !client.is_ready() {
        warn!("{} is not set in the environment or .env", config.llm.api_key_env);
    }
    let llm: Arc<dyn LlmClient> = Arc::new(client);

    let candidates = ToolRegistry::content_candidates(llm.clone(), config.generation_params(), &config.tools.disabled);
    let registry = ToolRegistry::bind(candidates);
    info!("Registered tools: {:?}", registry.tool_names());

    Ok(Dispatcher::new(llm, registry, config.dispatch_config()))
}

fn render_envelope(envelope: &Envelope) {
    match envelope {
        Envelope::Success { result, tool_call } => {
            println!("{}", "Tool call executed successfully!".green());
            println!("{} {}", "Tool Used:".bold(), tool_call.name.cyan());
            println!(
                "{} {}",
                "Arguments:".bold(),
                serde_json::Value::Object(tool_call.args.clone())
            );
            println!("{}\n\n{}", "Result:".bold(), result);
        }
        Envelope::Failure { error, raw_output } => {
            println!("{} {}", "Error:".red().bold(), error.red());
            if let Some(raw) = raw_output {
                println!("{}", raw.dimmed());
            }
        }
    }
}

async fn handle_invoke_command(dispatcher: &Dispatcher, input: &str, json: bool) -> Result<()> {
    info!("Invoking: {}", input);
    let envelope = dispatcher.invoke(input).await.context("Request failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        render_envelope(&envelope);
    }
    Ok(())
}

fn handle_tools_command(dispatcher: &Dispatcher, json: bool) -> Result<()> {
    let registry = dispatcher.registry();
    if json {
        println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
        return Ok(());
    }

    if registry.is_empty() {
        println!("{}", "No tools registered".yellow());
        return Ok(());
    }

    for tool in registry.tools() {
        let params = tool
            .params()
            .iter()
            .map(|p| format!("{}: {}", p.name, p.kind))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{}({})  {}", tool.name().cyan(), params, tool.description());
    }
    Ok(())
}

async fn run_interactive(dispatcher: &Dispatcher) -> Result<()> {
    println!("{}", "ContentCraft".bold());
    println!("Ask for an article, a comic or a tweet. Type 'exit' to quit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".cyan());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };
        let input = line.trim();

        if input.is_empty() {
            println!("{}", "Please enter a query.".yellow());
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        println!("{}", "Processing...".dimmed());
        match dispatcher.invoke(input).await {
            Ok(envelope) => render_envelope(&envelope),
            Err(e) => {
                warn!("Request failed: {}", e);
                println!("{} {}", "Request failed:".red().bold(), e);
            }
        }
        println!();
    }
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let dispatcher = build_dispatcher(config)?;

    match &cli.command {
        None => run_interactive(&dispatcher).await,
        Some(Commands::Invoke { input, json }) => handle_invoke_command(&dispatcher, input, *json).await,
        Some(Commands::Tools { json }) => handle_tools_command(&dispatcher, *json),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Credentials may come from a .env file
    load_env_file();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
