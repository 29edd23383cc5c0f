//! Admin command handlers
//!
//! Manifest editing, port changes and restarts of the catalog server.

use anyhow::{Context as _, Result};
use clap::Subcommand;
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;

use super::Context;
use crate::admin::AdminSession;
use crate::console::{ConsoleNavigator, ConsoleNotifier};
use crate::repository::HttpRepository;

/// Admin subcommands
#[derive(Subcommand)]
pub enum AdminCommands {
    /// Show the serving port and the manifest
    Show,
    /// Print the manifest, pretty-printed
    ManifestGet,
    /// Replace the manifest with the contents of a file
    ManifestPut {
        /// JSON file holding the new manifest
        file: PathBuf,
    },
    /// Save a new serving port (applied on restart)
    SetPort {
        port: String,
    },
    /// Restart the server and reconnect on its configured port
    Restart,
}

/// Handle admin commands
pub async fn handle_admin_command(command: AdminCommands, context: &Context) -> Result<()> {
    let mut session = open_session(context, &context.admin_url())?;

    match command {
        AdminCommands::Show => {
            session.load().await?;
            print_session(&session);
        }
        AdminCommands::ManifestGet => {
            session.load().await?;
            println!("{}", session.manifest());
        }
        AdminCommands::ManifestPut { file } => {
            let manifest = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            session.save_manifest(&manifest).await?;
        }
        AdminCommands::SetPort { port } => {
            session.save_port(&port).await?;
        }
        AdminCommands::Restart => restart(context, &mut session).await?,
    }

    Ok(())
}

fn open_session(context: &Context, admin_url: &str) -> Result<AdminSession> {
    let repository = Arc::new(HttpRepository::new(context.client.clone()));

    Ok(AdminSession::new(
        repository,
        Arc::new(ConsoleNavigator),
        Arc::new(ConsoleNotifier),
        admin_url,
    )?)
}

/// Restart, then load a fresh session at the address navigated to
async fn restart(context: &Context, session: &mut AdminSession) -> Result<()> {
    session.load().await?;
    let target = session.restart().await?;

    let mut reconnected = open_session(context, target.as_str())?;
    match reconnected.load().await {
        Ok(()) => println!(
            "{} {}",
            "✓ Server is back on port".green(),
            reconnected.current_port().bold()
        ),
        Err(_) => println!(
            "{}",
            format!("Server did not answer at {} yet.", reconnected.api_base()).yellow()
        ),
    }

    Ok(())
}

fn print_session(session: &AdminSession) {
    println!("{}", "Server:".bold());
    println!("  Admin API: {}", session.api_base().cyan());
    println!("  Port:      {}", session.current_port());
    println!("\n{}", "Manifest:".bold());
    println!("{}", session.manifest());
}
