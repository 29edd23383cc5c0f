//! Process execution
//!
//! Splits run commands and executes them with their output captured.
//! Commands are never handed to a shell; the run command is split on whitespace.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{BridgeError, Result};

/// A run command split into program and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn parse(run_command: &str) -> Result<Self> {
        let mut parts = run_command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(BridgeError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// The file an interpreter-style command operates on
    ///
    /// That is the first argument that is not a flag (`python3 -u demo.py
    /// input.txt` runs `demo.py`), or the program itself when every argument
    /// is a flag (`./tool`, `tool.exe`).
    pub fn target_file(&self) -> &str {
        self.args
            .iter()
            .find(|arg| !arg.starts_with('-'))
            .unwrap_or(&self.program)
    }
}

/// Resolves a program relative to `cwd` when it is given as a relative path
///
/// Bare names (`python3`) are left for `PATH` lookup.
fn resolve_program(program: &str, cwd: &Path) -> PathBuf {
    let path = Path::new(program);
    if path.is_relative() && path.components().count() > 1 {
        cwd.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Runs `program` with `args` in `cwd` and returns stdout followed by stderr
///
/// A non-zero exit becomes [`BridgeError::CommandFailed`] carrying the same
/// combined output.
pub(crate) async fn run_captured(
    program: impl AsRef<Path>,
    args: &[String],
    cwd: &Path,
) -> Result<String> {
    let program = program.as_ref();
    let resolved = resolve_program(&program.to_string_lossy(), cwd);

    info!("Running {} {:?} in {}", resolved.display(), args, cwd.display());

    let output = Command::new(&resolved)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| BridgeError::Spawn {
            program: program.display().to_string(),
            source,
        })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        debug!(
            "Command failed: program={} status={} output='{}'",
            resolved.display(),
            output.status,
            combined.trim()
        );
        return Err(BridgeError::CommandFailed {
            status: output.status.to_string(),
            output: combined,
        });
    }

    debug!(
        "Command completed successfully: stdout_len={}, stderr_len={}",
        output.stdout.len(),
        output.stderr.len()
    );
    Ok(combined)
}

/// Runs a parsed command line in `cwd`
pub(crate) async fn run_command_line(command: &CommandLine, cwd: &Path) -> Result<String> {
    run_captured(&command.program, &command.args, cwd).await
}

/// Checks that `tool` can be started, mirroring `tool --version`
pub(crate) async fn check_tool_available(tool: &str) -> Result<()> {
    let status = Command::new(tool)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(status) if status.success() => Ok(()),
        _ => Err(BridgeError::MissingTool(format!(
            "{} not found. Please install {} to run this script",
            tool, tool
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_line() {
        let cmd = CommandLine::parse("  python3   -u demo.py ").unwrap();
        assert_eq!(cmd.program, "python3");
        assert_eq!(cmd.args, vec!["-u", "demo.py"]);
        assert_eq!(cmd.target_file(), "demo.py");
    }

    #[test]
    fn test_parse_empty_command() {
        assert!(matches!(
            CommandLine::parse("   "),
            Err(BridgeError::EmptyCommand)
        ));
    }

    #[test]
    fn test_target_file_falls_back_to_program() {
        assert_eq!(CommandLine::parse("tool").unwrap().target_file(), "tool");
        assert_eq!(CommandLine::parse("tool --fast").unwrap().target_file(), "tool");
    }

    #[test]
    fn test_target_file_ignores_trailing_arguments() {
        let cmd = CommandLine::parse("python3 -u demo.py input.txt --verbose").unwrap();
        assert_eq!(cmd.target_file(), "demo.py");
        assert_eq!(CommandLine::parse("sh greet.sh world").unwrap().target_file(), "greet.sh");
    }

    #[test]
    fn test_resolve_program() {
        let cwd = Path::new("/tmp/work");
        assert_eq!(resolve_program("python3", cwd), PathBuf::from("python3"));
        assert_eq!(resolve_program("./run.sh", cwd), PathBuf::from("/tmp/work/./run.sh"));
        assert_eq!(resolve_program("/bin/sh", cwd), PathBuf::from("/bin/sh"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captured_combines_output() {
        let dir = tempfile::tempdir().unwrap();
        let args = vec!["-c".to_string(), "echo out; echo err >&2".to_string()];

        let output = run_captured("sh", &args, dir.path()).await.unwrap();

        assert_eq!(output, "out\nerr\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captured_non_zero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let args = vec!["-c".to_string(), "echo partial; exit 3".to_string()];

        let err = run_captured("sh", &args, dir.path()).await.unwrap_err();

        match err {
            BridgeError::CommandFailed { status, output } => {
                assert!(status.contains('3'));
                assert_eq!(output, "partial\n");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run_captured_missing_program() {
        let dir = tempfile::tempdir().unwrap();

        let err = run_captured("launchpad-no-such-program", &[], dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, BridgeError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_check_tool_available_missing() {
        let err = check_tool_available("launchpad-no-such-tool").await.unwrap_err();
        assert!(err.to_string().contains("launchpad-no-such-tool not found"));
    }
}
