//! Ops Copilot CLI
//!
//! A command-line front-end for chatting with the copilot, browsing the
//! alert and configuration fixtures, and invoking lookup tools directly.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{chat, fixtures, generate, tools};
use std::path::PathBuf;

/// Ops Copilot CLI
#[derive(Parser)]
#[command(name = "opsc")]
#[command(author, version, about = "CLI for the Ops Copilot", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via OPSC_API_URL env var)
    #[arg(long, env = "OPSC_API_URL")]
    pub api_url: Option<String>,

    /// Output format (defaults to table)
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the copilot a question
    Chat {
        /// Free-text question, e.g. "Why is vm-01 slow?"
        message: String,
    },

    /// List alerts
    Alerts {
        /// Filter by severity (warning, critical)
        #[arg(long, short)]
        severity: Option<String>,

        /// Filter by status (new, acknowledged, closed)
        #[arg(long)]
        status: Option<String>,
    },

    /// List resource configurations
    Configs,

    /// Summarize an alert
    Analyze {
        /// Alert ID, e.g. alert-001
        alert_id: String,
    },

    /// Show one resource configuration
    Config {
        /// Full resource ID or short name, e.g. vm-01
        resource_id: String,
    },

    /// Get a remediation template for an issue
    Fix {
        /// Issue description, e.g. "High CPU"
        issue_type: String,

        /// Resource type, e.g. "Virtual Machine"
        resource_type: String,
    },

    /// List the tools exposed to the orchestrator
    Tools,

    /// Write sample fixture data to a directory
    Generate {
        /// Target data directory
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Number of alerts to generate
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = config::Config::load()?;
    let format = settings.format(cli.format);

    // Initialize client
    let client = client::ApiClient::new(&settings.api_url(cli.api_url))?;

    // Execute command
    match cli.command {
        Commands::Chat { message } => {
            chat::chat(&client, &message, format).await?;
        }
        Commands::Alerts { severity, status } => {
            fixtures::list_alerts(&client, severity, status, format).await?;
        }
        Commands::Configs => {
            fixtures::list_configs(&client, format).await?;
        }
        Commands::Analyze { alert_id } => {
            chat::analyze(&client, &alert_id, format).await?;
        }
        Commands::Config { resource_id } => {
            chat::config(&client, &resource_id, format).await?;
        }
        Commands::Fix {
            issue_type,
            resource_type,
        } => {
            chat::fix(&client, &issue_type, &resource_type, format).await?;
        }
        Commands::Tools => {
            tools::list_tools(&client, format).await?;
        }
        Commands::Generate { data_dir, count } => {
            generate::generate(&data_dir, count)?;
        }
    }

    Ok(())
}
