//! Launchpad Execution Bridge
//!
//! The privileged local side of the launcher: the only place that touches the
//! filesystem or spawns processes.
//!
//! Architecture:
//! - Service: the [`ExecutionBridge`] trait and its local implementation
//! - Workspace: temporary directories an artifact is materialized into
//! - Process: command-line splitting and captured execution
//! - Scripts: the legacy named-script flow (python, ruby, c, binary, shell)
//! - Settings: the persisted server address
//!
//! Callers hand the bridge a payload and a run command and get back the
//! captured output, or a [`BridgeError`] whose message can be shown as-is.

pub mod error;
mod process;
mod scripts;
pub mod service;
pub mod settings;
mod workspace;

pub use error::{BridgeError, Result};
pub use service::{ExecutionBridge, LocalExecutionBridge};
pub use settings::{DEFAULT_SERVER_ADDRESS, ServerAddressStore};
