//! Server configuration
//!
//! Process-level settings read from the environment. The listening port is not
//! among them: it lives in `server.config.json` next to the manifest so the
//! admin surface can change it.

use std::path::PathBuf;
use std::time::Duration;

/// Server process configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `manifest.json`, `server.config.json` and the artifacts
    pub server_files: PathBuf,

    /// Host the listener binds to
    pub bind_host: String,

    /// How long a restart waits so the restart response reaches the caller
    pub restart_delay: Duration,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - LAUNCHPAD_SERVER_FILES (default: ./server-files)
    /// - LAUNCHPAD_BIND_HOST (default: 0.0.0.0)
    /// - LAUNCHPAD_RESTART_DELAY_MS (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let server_files = std::env::var("LAUNCHPAD_SERVER_FILES")
            .map(PathBuf::from)
            .unwrap_or(defaults.server_files);

        let bind_host = std::env::var("LAUNCHPAD_BIND_HOST").unwrap_or(defaults.bind_host);

        let restart_delay = std::env::var("LAUNCHPAD_RESTART_DELAY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.restart_delay);

        Self {
            server_files,
            bind_host,
            restart_delay,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_host.trim().is_empty() {
            anyhow::bail!("bind_host cannot be empty");
        }

        if !self.server_files.is_dir() {
            anyhow::bail!(
                "server files directory {} does not exist",
                self.server_files.display()
            );
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_files: PathBuf::from("./server-files"),
            bind_host: "0.0.0.0".to_string(),
            restart_delay: Duration::from_secs(1),
        }
    }
}
