//! Configuration module
//!
//! Handles CLI configuration: where settings live and which servers to talk to.

use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the launcher's `config.json`
    pub config_dir: PathBuf,

    /// Server address for this invocation only, overriding the saved one
    pub server_address: Option<String>,

    /// Base URL of the admin API; the server address when unset
    pub admin_url: Option<String>,
}

/// Default settings directory: `$HOME/.config/launchpad`
pub fn default_config_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home).join(".config").join("launchpad")
}
