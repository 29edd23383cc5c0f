//! Workflow Module
//!
//! Drives catalog entry selection through artifact fetch and local execution,
//! and owns the status text a front end shows.

pub mod error;
pub mod orchestrator;
pub mod status;

pub use error::{Result, WorkflowError};
pub use orchestrator::Orchestrator;
pub use status::{Notification, Notifier, Outcome, RunState};
