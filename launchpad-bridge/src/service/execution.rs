//! Execution service
//!
//! Materializes an artifact on disk and runs it:
//! - Archives are unpacked into a fresh workspace and the run command is
//!   executed from the workspace root
//! - Single files are written into a fresh workspace under the file name the
//!   run command refers to, then the run command is executed there
//!
//! The workspace is removed once the command has finished.

use async_trait::async_trait;
use launchpad_client::LaunchpadClient;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::{BridgeError, Result};
use crate::process::{self, CommandLine};
use crate::scripts::{self, ScriptLanguage};
use crate::settings::ServerAddressStore;
use crate::workspace::Workspace;

/// Service trait for running artifacts on the local machine
#[async_trait]
pub trait ExecutionBridge: Send + Sync {
    /// Saves `payload`, optionally unpacks it, and runs `run_command`
    ///
    /// # Arguments
    /// * `is_archive` - Unpack `payload` as a zip before running
    /// * `payload` - The artifact bytes
    /// * `run_command` - Command line, relative to the materialized artifact root
    ///
    /// # Returns
    /// The captured output of the command
    async fn save_and_run(&self, is_archive: bool, payload: Vec<u8>, run_command: &str)
    -> Result<String>;

    /// Runs a script staged on the server under `filename`
    ///
    /// # Arguments
    /// * `language` - One of `shell`, `python`, `ruby`, `c`, `binary`
    /// * `filename` - Path of the script relative to the server root
    ///   (for `shell`, a local command line)
    async fn run_named_script(&self, language: &str, filename: &str) -> Result<String>;
}

/// Bridge that runs artifacts as local processes
pub struct LocalExecutionBridge {
    client: LaunchpadClient,
    address: Arc<ServerAddressStore>,
}

impl LocalExecutionBridge {
    /// Creates a new local bridge
    ///
    /// # Arguments
    /// * `client` - Used by the legacy flow to download staged scripts
    /// * `address` - Where staged scripts are downloaded from
    pub fn new(client: LaunchpadClient, address: Arc<ServerAddressStore>) -> Self {
        Self { client, address }
    }

    async fn run_in_workspace(
        &self,
        workspace: &Workspace,
        is_archive: bool,
        payload: Vec<u8>,
        command: &CommandLine,
    ) -> Result<String> {
        if is_archive {
            let entries = workspace.unpack(payload).await?;
            info!("Unpacked {} archive entries", entries);
            return process::run_command_line(command, workspace.path()).await;
        }

        let file_name = single_file_name(command);
        let path = workspace.write_executable(&file_name, &payload).await?;

        if command.args.is_empty() {
            // the artifact is the program
            process::run_captured(&path, &[], workspace.path()).await
        } else {
            process::run_command_line(command, workspace.path()).await
        }
    }

    async fn run_staged(&self, language: ScriptLanguage, filename: &str) -> Result<String> {
        let server_address = self.address.get();
        let payload = self
            .client
            .fetch_staged_file(&server_address, filename)
            .await?;
        if payload.is_empty() {
            return Err(BridgeError::EmptyDownload);
        }

        let workspace = Workspace::create()?;
        let result = match workspace
            .write_executable(&scripts::local_file_name(filename), &payload)
            .await
        {
            Ok(script) => scripts::run_downloaded(language, &workspace, &script).await,
            Err(e) => Err(e),
        };
        workspace.cleanup();
        result
    }
}

/// File name a single-file payload is saved under
///
/// Windows executables run without arguments get an `.exe` suffix.
fn single_file_name(command: &CommandLine) -> String {
    let name = command.target_file();
    if cfg!(windows) && command.args.is_empty() && !name.ends_with(".exe") {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

#[async_trait]
impl ExecutionBridge for LocalExecutionBridge {
    async fn save_and_run(
        &self,
        is_archive: bool,
        payload: Vec<u8>,
        run_command: &str,
    ) -> Result<String> {
        let command = CommandLine::parse(run_command)?;
        info!(
            "Materializing {} ({} bytes) for '{}'",
            if is_archive { "archive" } else { "file" },
            payload.len(),
            run_command
        );

        let workspace = Workspace::create()?;
        let result = self
            .run_in_workspace(&workspace, is_archive, payload, &command)
            .await;
        workspace.cleanup();

        if let Err(e) = &result {
            error!("Run of '{}' failed: {}", run_command, e);
        }
        result
    }

    async fn run_named_script(&self, language: &str, filename: &str) -> Result<String> {
        let language: ScriptLanguage = language.parse()?;
        info!("Running staged script {} as {:?}", filename, language);

        if !language.needs_download() {
            let cwd = std::env::current_dir()
                .map_err(|e| BridgeError::Save(format!("no working directory: {}", e)))?;
            return scripts::run_shell(filename, &cwd).await;
        }

        self.run_staged(language, filename).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::test_support::zip_of;

    fn bridge_at(address: &str) -> (LocalExecutionBridge, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ServerAddressStore::load_from_dir(dir.path()));
        store.set(address).unwrap();
        (LocalExecutionBridge::new(LaunchpadClient::new(), store), dir)
    }

    fn bridge() -> (LocalExecutionBridge, tempfile::TempDir) {
        bridge_at("http://127.0.0.1:9")
    }

    #[test]
    fn test_single_file_name() {
        let command = CommandLine::parse("python demo.py").unwrap();
        assert_eq!(single_file_name(&command), "demo.py");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_single_file_with_interpreter() {
        let (bridge, _dir) = bridge();

        let output = bridge
            .save_and_run(false, b"echo 1".to_vec(), "sh demo.sh")
            .await
            .unwrap();

        assert_eq!(output, "1\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_single_file_with_trailing_argument() {
        let (bridge, _dir) = bridge();

        let output = bridge
            .save_and_run(false, b"echo got $1".to_vec(), "sh greet.sh world")
            .await
            .unwrap();

        assert_eq!(output, "got world\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_single_file_is_the_program() {
        let (bridge, _dir) = bridge();

        let output = bridge
            .save_and_run(false, b"#!/bin/sh\necho standalone\n".to_vec(), "tool")
            .await
            .unwrap();

        assert_eq!(output, "standalone\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_archive_runs_from_root() {
        let (bridge, _dir) = bridge();
        let payload = zip_of(&[
            ("main.sh", "echo zipped; cat data/input.txt"),
            ("data/input.txt", "1 2 3"),
        ]);

        let output = bridge
            .save_and_run(true, payload, "sh main.sh")
            .await
            .unwrap();

        assert_eq!(output, "zipped\n1 2 3");
    }

    #[tokio::test]
    async fn test_archive_with_bad_payload() {
        let (bridge, _dir) = bridge();

        let err = bridge
            .save_and_run(true, b"plain text".to_vec(), "sh main.sh")
            .await
            .unwrap_err();

        assert!(matches!(err, BridgeError::Unpack(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_reports_output() {
        let (bridge, _dir) = bridge();

        let err = bridge
            .save_and_run(false, b"echo halfway; exit 4".to_vec(), "sh fail.sh")
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("command execution failed"));
        assert!(message.contains("halfway"));
    }

    #[tokio::test]
    async fn test_empty_run_command() {
        let (bridge, _dir) = bridge();

        let err = bridge
            .save_and_run(false, b"x".to_vec(), "  ")
            .await
            .unwrap_err();

        assert!(matches!(err, BridgeError::EmptyCommand));
    }

    #[tokio::test]
    async fn test_unsupported_language() {
        let (bridge, _dir) = bridge();

        let err = bridge.run_named_script("cobol", "x.cbl").await.unwrap_err();

        assert_eq!(err.to_string(), "unsupported language: cobol");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shell_language_runs_local_command() {
        let (bridge, _dir) = bridge();

        let output = bridge
            .run_named_script("shell", "echo hello")
            .await
            .unwrap();

        assert_eq!(output, "hello\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_staged_binary_is_downloaded_and_run() {
        use axum::{Router, routing::get};

        let router = Router::new()
            .route("/bin/hello", get(|| async { "#!/bin/sh\necho staged\n" }))
            .route("/bin/empty", get(|| async { "" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        let (bridge, _dir) = bridge_at(&base);

        let output = bridge.run_named_script("binary", "bin/hello").await.unwrap();
        assert_eq!(output, "staged\n");

        let err = bridge
            .run_named_script("binary", "bin/empty")
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::EmptyDownload));

        let err = bridge
            .run_named_script("binary", "bin/missing")
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Download(_)));
    }
}
