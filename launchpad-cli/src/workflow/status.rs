//! Run state, status text and notifications

use std::fmt;

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Per-invocation run state
///
/// `Idle -> FetchingArtifact -> Invoking -> Done`, or straight from `Idle`
/// (or `FetchingArtifact`) to `Done(Failure)`. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    FetchingArtifact,
    Invoking,
    Done(Outcome),
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::FetchingArtifact => write!(f, "fetching artifact"),
            RunState::Invoking => write!(f, "invoking"),
            RunState::Done(Outcome::Success) => write!(f, "done (success)"),
            RunState::Done(Outcome::Failure) => write!(f, "done (failure)"),
        }
    }
}

/// A transient, user-visible notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub outcome: Outcome,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failure,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Where status changes and notifications are surfaced
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);

    /// Called whenever the visible status text changes
    fn status_changed(&self, _status: &str) {}
}

/// Status slot shared by every invocation
///
/// Each run and each catalog fetch is tagged with an invocation id. Updates
/// from an invocation that a later one has superseded are dropped.
#[derive(Debug, Default)]
pub struct StatusBoard {
    status: String,
    run_state: RunState,
    current_run: u64,
    current_fetch: u64,
}

impl StatusBoard {
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Makes `id` the run whose updates are shown
    pub fn begin_run(&mut self, id: u64) {
        self.current_run = id;
        self.run_state = RunState::Idle;
    }

    /// Makes `id` the fetch whose snapshot is kept
    pub fn begin_fetch(&mut self, id: u64) {
        self.current_fetch = id;
    }

    pub fn is_current_run(&self, id: u64) -> bool {
        self.current_run == id
    }

    pub fn is_current_fetch(&self, id: u64) -> bool {
        self.current_fetch == id
    }

    /// Records a transition of run `id`; returns false if the run is stale
    ///
    /// Once the current run is `Done` its state no longer changes.
    pub fn update_run(&mut self, id: u64, state: RunState, status: Option<&str>) -> bool {
        if !self.is_current_run(id) || matches!(self.run_state, RunState::Done(_)) {
            return false;
        }

        self.run_state = state;
        if let Some(status) = status {
            self.status = status.to_string();
        }
        true
    }

    /// Replaces the status text outside of any run
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}
