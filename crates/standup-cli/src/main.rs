//! standup CLI - MCP server and command-line front end for standup-tools.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use standup_core::{Collector, Config};
use standup_git::CliRepositoryQuery;
use standup_mcp::{McpServer, StandupHandler};
use standup_pipeline::ReportPipeline;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "standup")]
#[command(author, version, about = "Standup reports from git and GitHub activity", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdio (default)
    Serve,

    /// Print a standup report to stdout
    Report {
        /// Repository to report on
        #[arg(short, long, default_value = ".")]
        repo: String,

        /// Lookback window in hours
        #[arg(short, long, default_value_t = 24.0)]
        since_hours: f64,

        /// Print the collected data as JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a value (locale, commands.git, commands.gh, commands.timeout_secs)
    Set { key: String, value: String },

    /// Print a single value
    Get { key: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the MCP protocol, so logs go to stderr
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = Config::load_from(&config_path)?;
            let mut server = McpServer::new(StandupHandler::new(build_pipeline(&config)));
            server.run().await?;
        }
        Commands::Report {
            repo,
            since_hours,
            json,
        } => {
            if !(since_hours.is_finite() && since_hours > 0.0) {
                anyhow::bail!("--since-hours must be a positive number, got {}", since_hours);
            }
            let config = Config::load_from(&config_path)?;
            let pipeline = build_pipeline(&config);
            if json {
                let report = pipeline
                    .collect(&repo, since_hours)
                    .await
                    .with_context(|| format!("Failed to collect activity for {}", repo))?;
                println!("{}", report.to_json()?);
            } else {
                let markdown = pipeline
                    .generate(&repo, since_hours)
                    .await
                    .with_context(|| format!("Failed to build report for {}", repo))?;
                print!("{}", markdown);
            }
        }
        Commands::Config { command } => handle_config(command, &config_path)?,
    }

    Ok(())
}

fn build_pipeline(config: &Config) -> ReportPipeline {
    let messages = config.locale.messages();
    let port = CliRepositoryQuery::from_config(&config.commands, messages);

    tracing::debug!(
        locale = %config.locale,
        git = %config.commands.git,
        gh = %config.commands.gh,
        timeout_secs = config.commands.timeout_secs,
        "Pipeline configured"
    );

    ReportPipeline::new(Collector::new(Arc::new(port)), messages)
}

fn handle_config(command: ConfigCommands, path: &Path) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = Config::load_from(path)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_from(path)?;
            config.set(&key, &value)?;
            config.save_to(path)?;
            tracing::info!("Set {} = {}", key, value);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load_from(path)?;
            println!("{}", config.get(&key)?);
        }
    }
    Ok(())
}
