//! Catalog command handlers
//!
//! Listing, inspecting and running catalog entries.

use anyhow::{Result, bail};
use colored::*;
use launchpad_core::domain::catalog::{CatalogEntry, CatalogSnapshot};
use tracing::debug;

use super::Context;
use crate::workflow::{Orchestrator, WorkflowError};

/// List all applications
pub async fn list_applications(context: &Context) -> Result<()> {
    let orchestrator = context.orchestrator();
    load_catalog(&orchestrator).await?;

    let snapshot = orchestrator.snapshot();
    if snapshot.is_empty() {
        println!("{}", "No applications found.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Found {} application(s) on {}:",
            snapshot.len(),
            orchestrator.server_address()
        )
        .bold()
    );
    if let Some(fetched_at) = snapshot.fetched_at() {
        println!(
            "{}",
            format!("as of {}", fetched_at.format("%Y-%m-%d %H:%M:%S")).dimmed()
        );
    }
    println!();
    for entry in snapshot.entries() {
        print_entry_summary(entry, &snapshot);
    }

    Ok(())
}

/// Show one application
pub async fn show_application(context: &Context, name: &str, index: Option<usize>) -> Result<()> {
    let orchestrator = context.orchestrator();
    load_catalog(&orchestrator).await?;

    let entry = orchestrator.find_entry(name, index)?;
    print_entry_details(&entry);

    println!("\n{}", "Description:".bold());
    orchestrator.show_details(&entry);

    Ok(())
}

/// Fetch and run one application
///
/// Progress and output are printed as the status changes.
pub async fn run_application(context: &Context, name: &str, index: Option<usize>) -> Result<()> {
    let orchestrator = context.orchestrator();
    load_catalog(&orchestrator).await?;

    let result = orchestrator.run_by_name(name, index).await;
    debug!("Run of '{}' ended {}", name, orchestrator.run_state());

    match result {
        Ok(_) => Ok(()),
        Err(
            e @ (WorkflowError::NotFound(_)
            | WorkflowError::Ambiguous { .. }
            | WorkflowError::IndexOutOfRange { .. }),
        ) => Err(e.into()),
        // the failure is already on screen
        Err(_) => bail!("'{}' did not complete", name),
    }
}

async fn load_catalog(orchestrator: &Orchestrator) -> Result<()> {
    if orchestrator.refresh_catalog().await.is_err() {
        bail!(
            "Could not reach the catalog at {}",
            orchestrator.server_address()
        );
    }
    Ok(())
}

/// Print a one-entry summary, numbering entries whose name is shared
fn print_entry_summary(entry: &CatalogEntry, snapshot: &CatalogSnapshot) {
    let twins: Vec<_> = snapshot.find_by_name(&entry.name).collect();
    let label = match twins.iter().position(|twin| std::ptr::eq(*twin, entry)) {
        Some(position) if twins.len() > 1 => format!("{} [{}]", entry.name, position + 1),
        _ => entry.name.clone(),
    };

    println!("  {} {}", "▸".cyan(), label.bold());
    println!("    Type: {}", entry.artifact_type.dimmed());
    println!("    Run:  {}", entry.run_command.dimmed());
    if !entry.description.is_empty() {
        println!("    {}", entry.description);
    }
    println!();
}

/// Print detailed entry information
fn print_entry_details(entry: &CatalogEntry) {
    println!("{}", "Application Details:".bold());
    println!("  Name:     {}", entry.name.cyan());
    println!("  Type:     {}", entry.artifact_type);
    println!(
        "  Archive:  {}",
        if entry.is_archive() {
            "yes".green()
        } else {
            "no".dimmed()
        }
    );
    println!("  Artifact: {}", entry.artifact_path.dimmed());
    println!("  Run:      {}", entry.run_command);
    if let Some(build) = entry.build_command() {
        println!("  Build:    {}", build.dimmed());
    }
}
