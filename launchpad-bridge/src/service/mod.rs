//! Service layer
//!
//! The execution bridge is trait-based so the launcher's workflow can run
//! against any implementation: the local process spawner here, a sandboxed
//! runner, or an in-memory fake in tests.

mod execution;

// Re-export trait
pub use execution::ExecutionBridge;

// Re-export implementation
pub use execution::LocalExecutionBridge;
