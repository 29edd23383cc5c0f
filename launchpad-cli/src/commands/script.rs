//! Staged script command handler

use anyhow::Result;
use colored::*;

use super::Context;

/// Run a script staged on the server through the bridge's legacy flow
pub async fn run_script(context: &Context, language: &str, filename: &str) -> Result<()> {
    println!(
        "{}",
        format!("Running {} script {}...", language, filename).dimmed()
    );

    let output = context.bridge.run_named_script(language, filename).await?;
    print!("{}", output);

    Ok(())
}
