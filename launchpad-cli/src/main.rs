//! Launchpad CLI
//!
//! Browse a remote application catalog, run its entries locally and
//! administer the catalog server.

mod admin;
mod commands;
mod config;
mod console;
mod repository;
mod workflow;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "launchpad")]
#[command(about = "Run applications published by a Launchpad catalog server", long_about = None)]
struct Cli {
    /// Server address for this invocation (the saved address is left untouched)
    #[arg(long, env = "LAUNCHPAD_SERVER")]
    server_address: Option<String>,

    /// Directory holding the launcher settings
    #[arg(long, env = "LAUNCHPAD_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Base URL of the admin API (defaults to the server address)
    #[arg(long, env = "LAUNCHPAD_ADMIN_URL")]
    admin_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "launchpad_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        config_dir: cli.config_dir.unwrap_or_else(config::default_config_dir),
        server_address: cli.server_address,
        admin_url: cli.admin_url,
    };

    handle_command(cli.command, config).await
}
