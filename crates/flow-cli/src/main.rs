//! flow-cli - Command-line tool for the figma-flow backend
//!
//! Sends messages to the echo endpoint and uploads images, the same calls the
//! editor extension makes.

mod commands;
mod config;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flow_client::FlowClient;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{FileConfig, Overrides};
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "flow-cli")]
#[command(author, version, about = "figma-flow backend CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Server URL [default: http://127.0.0.1:5000]
    #[arg(short, long, env = "FLOW_SERVER")]
    server: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "FLOW_CONFIG")]
    config: Option<PathBuf>,

    /// Request timeout in seconds [default: 30]
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output format [default: table]
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the server is reachable
    Health,

    /// Fetch the static test payload
    Test,

    /// Send code and a prompt to the process endpoint
    Process {
        /// Code to send
        #[arg(long)]
        code: Option<String>,

        /// Prompt to send
        #[arg(long)]
        prompt: Option<String>,

        /// Use one message for both code and prompt; falls back to the
        /// configured `[process] prompt` for the prompt
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Upload one or more PNG/JPEG images
    Upload {
        /// Image file path(s)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    // Flags win over the config file
    let settings = FileConfig::load(cli.config.as_deref())?.resolve(Overrides {
        server: cli.server.as_deref(),
        timeout_secs: cli.timeout,
        format: cli.output,
        no_color: cli.no_color,
    });
    tracing::debug!(?settings, "Resolved settings");

    let ctx = OutputContext::new(settings.format, settings.no_color, cli.quiet);
    let client = create_client(&settings.server, settings.timeout)?;

    match &cli.command {
        Commands::Health => commands::health(&client, &ctx).await?,

        Commands::Test => commands::test(&client, &ctx).await?,

        Commands::Process {
            code,
            prompt,
            message,
        } => {
            let request = commands::process::build_request(
                code.as_deref(),
                prompt.as_deref(),
                message.as_deref(),
                settings.default_prompt.as_deref(),
            );
            commands::process(&client, &request, &ctx).await?;
        }

        Commands::Upload { files } => commands::upload(&client, files, &ctx).await?,
    }

    Ok(())
}

/// Connect timeout, separate from the per-request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Create a client for the given server URL
fn create_client(server: &str, timeout: Duration) -> Result<FlowClient> {
    FlowClient::with_config(server, timeout, CONNECT_TIMEOUT)
        .with_context(|| format!("Failed to create client for {}", server))
}
