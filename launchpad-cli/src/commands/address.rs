//! Server address command handlers

use anyhow::{Context as _, Result};
use clap::Subcommand;
use colored::*;

use super::Context;
use crate::workflow::WorkflowError;

/// Address subcommands
#[derive(Subcommand)]
pub enum AddressCommands {
    /// Print the server address in effect
    Get,
    /// Ask the server at the current address whether it is running
    Check,
    /// Save a new server address and reload the catalog from it
    Set {
        /// Base URL of the catalog server, e.g. http://localhost:8080
        url: String,
    },
}

/// Handle address commands
pub async fn handle_address_command(command: AddressCommands, context: &Context) -> Result<()> {
    match command {
        AddressCommands::Get => {
            println!("{}", context.address.get());
            Ok(())
        }
        AddressCommands::Check => check_address(context).await,
        AddressCommands::Set { url } => set_address(context, &url).await,
    }
}

async fn check_address(context: &Context) -> Result<()> {
    let address = context.address.get();
    let status = context
        .client
        .server_status(&address)
        .await
        .with_context(|| format!("No answer from {}", address))?;

    println!("{} {}", "✓".green(), status);
    Ok(())
}

async fn set_address(context: &Context, url: &str) -> Result<()> {
    let orchestrator = context.orchestrator();

    match orchestrator.set_server_address(url).await {
        Ok(count) => {
            println!("{} {}", "✓ Server address set to".green(), url.bold());
            println!("  {} application(s) available", count);
            Ok(())
        }
        // saved, but the new server did not answer; already reported
        Err(WorkflowError::Catalog(_)) => {
            println!("{} {}", "✓ Server address set to".green(), url.bold());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
