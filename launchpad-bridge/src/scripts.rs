//! Legacy named scripts
//!
//! Before catalog artifacts existed, the service published bare script files and
//! the launcher ran them by language. The flow survives for services that still
//! stage scripts that way.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{BridgeError, Result};
use crate::process::{self, CommandLine};
use crate::workspace::{Workspace, make_executable};

/// Languages the legacy flow knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScriptLanguage {
    /// The filename is itself a local command line
    Shell,
    Python,
    Ruby,
    /// C source, compiled with gcc before running
    C,
    /// A prebuilt executable
    Binary,
}

impl FromStr for ScriptLanguage {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "shell" => Ok(Self::Shell),
            "python" => Ok(Self::Python),
            "ruby" => Ok(Self::Ruby),
            "c" => Ok(Self::C),
            "binary" => Ok(Self::Binary),
            other => Err(BridgeError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl ScriptLanguage {
    /// Whether the script has to be downloaded before it can run
    pub fn needs_download(self) -> bool {
        !matches!(self, Self::Shell)
    }
}

/// Name a downloaded script is saved under, keeping its extension
pub(crate) fn local_file_name(filename: &str) -> String {
    let extension = Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    format!("script{}", extension)
}

/// Runs an already downloaded script according to its language
pub(crate) async fn run_downloaded(
    language: ScriptLanguage,
    workspace: &Workspace,
    script: &Path,
) -> Result<String> {
    let script_arg = script.to_string_lossy().into_owned();
    let cwd = workspace.path();

    match language {
        ScriptLanguage::Python => {
            let args = vec!["-u".to_string(), script_arg];
            process::run_captured("python3", &args, cwd).await
        }
        ScriptLanguage::Ruby => process::run_captured("ruby", &[script_arg], cwd).await,
        ScriptLanguage::C => {
            let binary = compile_c(script, cwd).await?;
            process::run_captured(&binary, &[], cwd).await
        }
        ScriptLanguage::Binary | ScriptLanguage::Shell => {
            make_executable(script).await?;
            process::run_captured(script, &[], cwd).await
        }
    }
}

/// Runs a shell-language "script", which is a local command line
pub(crate) async fn run_shell(command_line: &str, cwd: &Path) -> Result<String> {
    let command = CommandLine::parse(command_line)?;
    process::run_command_line(&command, cwd).await
}

async fn compile_c(source: &Path, cwd: &Path) -> Result<PathBuf> {
    process::check_tool_available("gcc").await?;

    let output = if cfg!(windows) {
        source.with_extension("exe")
    } else {
        source.with_extension("out")
    };
    let args = vec![
        source.to_string_lossy().into_owned(),
        "-o".to_string(),
        output.to_string_lossy().into_owned(),
    ];

    process::run_captured("gcc", &args, cwd)
        .await
        .map_err(|e| match e {
            BridgeError::CommandFailed { status, output } => BridgeError::CommandFailed {
                status: format!("failed to compile c code ({})", status),
                output,
            },
            other => other,
        })?;

    make_executable(&output).await?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language() {
        assert_eq!("python".parse::<ScriptLanguage>().unwrap(), ScriptLanguage::Python);
        assert_eq!("c".parse::<ScriptLanguage>().unwrap(), ScriptLanguage::C);
        assert!(matches!(
            "cobol".parse::<ScriptLanguage>(),
            Err(BridgeError::UnsupportedLanguage(lang)) if lang == "cobol"
        ));
    }

    #[test]
    fn test_only_shell_skips_download() {
        assert!(!ScriptLanguage::Shell.needs_download());
        assert!(ScriptLanguage::Binary.needs_download());
    }

    #[test]
    fn test_local_file_name_keeps_extension() {
        assert_eq!(local_file_name("scripts/hello.py"), "script.py");
        assert_eq!(local_file_name("tool"), "script");
    }
}
