//! Workflow orchestrator
//!
//! Turns a catalog entry into a local run:
//! select entry -> fetch artifact -> hand payload to the bridge -> report.
//!
//! Every failure writes the status text and raises exactly one failure
//! notification. Overlapping invocations are allowed; only the latest one
//! owns the status slot and the held snapshot.

use launchpad_bridge::{ExecutionBridge, ServerAddressStore};
use launchpad_core::domain::catalog::{CatalogEntry, CatalogSnapshot};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use super::error::{Result, WorkflowError};
use super::status::{Notification, Notifier, Outcome, RunState, StatusBoard};
use crate::repository::{ArtifactRepository, CatalogRepository};

/// Title of the notification raised when the catalog cannot be loaded
pub const CATALOG_FAILURE_TITLE: &str = "Could not load applications";

pub struct Orchestrator {
    catalog: Arc<dyn CatalogRepository>,
    artifacts: Arc<dyn ArtifactRepository>,
    bridge: Arc<dyn ExecutionBridge>,
    address: Arc<ServerAddressStore>,
    notifier: Arc<dyn Notifier>,
    board: Mutex<StatusBoard>,
    snapshot: Mutex<CatalogSnapshot>,
    invocations: AtomicU64,
}

impl Orchestrator {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        artifacts: Arc<dyn ArtifactRepository>,
        bridge: Arc<dyn ExecutionBridge>,
        address: Arc<ServerAddressStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            artifacts,
            bridge,
            address,
            notifier,
            board: Mutex::new(StatusBoard::default()),
            snapshot: Mutex::new(CatalogSnapshot::empty()),
            invocations: AtomicU64::new(0),
        }
    }

    // =============================================================================
    // Catalog
    // =============================================================================

    /// Fetch the catalog and replace the held snapshot
    ///
    /// On failure the previous snapshot (possibly empty) is kept. Returns the
    /// number of entries fetched.
    pub async fn refresh_catalog(&self) -> Result<usize> {
        let id = self.next_invocation();
        self.board().begin_fetch(id);

        let address = self.address.get();
        if address.trim().is_empty() {
            let err = WorkflowError::AddressNotSet;
            self.notifier
                .notify(&Notification::failure(CATALOG_FAILURE_TITLE, err.to_string()));
            return Err(err);
        }

        debug!("Fetching catalog from {}", address);
        match self.catalog.fetch_catalog(&address).await {
            Ok(entries) => {
                let count = entries.len();
                if self.board().is_current_fetch(id) {
                    *self.snapshot_guard() = CatalogSnapshot::new(entries);
                    info!("Catalog refreshed ({} entries)", count);
                } else {
                    debug!("Dropping catalog from superseded fetch {}", id);
                }
                Ok(count)
            }
            Err(e) => {
                warn!("Catalog fetch failed: {}", e);
                self.notifier
                    .notify(&Notification::failure(CATALOG_FAILURE_TITLE, e.to_string()));
                Err(WorkflowError::Catalog(e))
            }
        }
    }

    /// Copy an entry's description into the status slot
    pub fn show_details(&self, entry: &CatalogEntry) -> String {
        self.board().set_status(&entry.description);
        self.notifier.status_changed(&entry.description);
        entry.description.clone()
    }

    /// Look up an entry in the held snapshot
    ///
    /// Names are not unique. With several matches a 1-based `index` picks one;
    /// without it the lookup is ambiguous.
    pub fn find_entry(&self, name: &str, index: Option<usize>) -> Result<CatalogEntry> {
        let snapshot = self.snapshot_guard();
        let matches: Vec<&CatalogEntry> = snapshot.find_by_name(name).collect();
        let count = matches.len();

        match (count, index) {
            (0, _) => Err(WorkflowError::NotFound(name.to_string())),
            (_, Some(index)) => index
                .checked_sub(1)
                .and_then(|i| matches.get(i))
                .map(|entry| (*entry).clone())
                .ok_or_else(|| WorkflowError::IndexOutOfRange {
                    name: name.to_string(),
                    index,
                    count,
                }),
            (1, None) => Ok(matches[0].clone()),
            (_, None) => Err(WorkflowError::Ambiguous {
                name: name.to_string(),
                count,
            }),
        }
    }

    // =============================================================================
    // Runs
    // =============================================================================

    /// Fetch an entry's artifact, run it and report the result
    ///
    /// Returns the captured output on success.
    pub async fn run_entry(&self, entry: &CatalogEntry) -> Result<String> {
        let id = self.next_invocation();
        self.board().begin_run(id);
        let name = entry.name.as_str();

        let address = self.address.get();
        if address.trim().is_empty() {
            return self.fail(id, name, WorkflowError::AddressNotSet);
        }

        self.transition(
            id,
            RunState::FetchingArtifact,
            &format!("Preparing '{}'...", name),
        );
        let payload = match self.artifacts.fetch_artifact(&address, name).await {
            Ok(payload) => payload,
            Err(e) => return self.fail(id, name, WorkflowError::Artifact(e)),
        };

        self.transition(id, RunState::Invoking, &format!("Executing '{}'...", name));
        info!(
            "Running '{}' ({} bytes, archive: {})",
            name,
            payload.len(),
            entry.is_archive()
        );
        match self
            .bridge
            .save_and_run(entry.is_archive(), payload, &entry.run_command)
            .await
        {
            Ok(output) => {
                self.transition(id, RunState::Done(Outcome::Success), &output);
                self.notifier.notify(&Notification::success(
                    format!("'{}' finished", name),
                    "Execution completed successfully",
                ));
                Ok(output)
            }
            Err(e) => self.fail(id, name, WorkflowError::Execution(e)),
        }
    }

    /// Run the entry called `name` from the held snapshot
    pub async fn run_by_name(&self, name: &str, index: Option<usize>) -> Result<String> {
        let entry = self.find_entry(name, index)?;
        self.run_entry(&entry).await
    }

    // =============================================================================
    // Settings
    // =============================================================================

    /// Persist a new server address and reload the catalog from it
    pub async fn set_server_address(&self, address: &str) -> Result<usize> {
        self.address.set(address).map_err(WorkflowError::Settings)?;
        self.refresh_catalog().await
    }

    pub fn server_address(&self) -> String {
        self.address.get()
    }

    // =============================================================================
    // Observers
    // =============================================================================

    pub fn status(&self) -> String {
        self.board().status().to_string()
    }

    /// State of the latest run
    pub fn run_state(&self) -> RunState {
        self.board().run_state()
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.snapshot_guard().clone()
    }

    // =============================================================================
    // Internals
    // =============================================================================

    fn next_invocation(&self) -> u64 {
        self.invocations.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn board(&self) -> MutexGuard<'_, StatusBoard> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot_guard(&self) -> MutexGuard<'_, CatalogSnapshot> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, id: u64, state: RunState, status: &str) {
        let applied = self.board().update_run(id, state, Some(status));
        if applied {
            self.notifier.status_changed(status);
        } else {
            debug!("Dropping update from superseded run {}: {}", id, state);
        }
    }

    fn fail(&self, id: u64, name: &str, err: WorkflowError) -> Result<String> {
        let message = err.to_string();
        warn!("Run of '{}' failed: {}", name, message);

        self.transition(id, RunState::Done(Outcome::Failure), &message);
        self.notifier
            .notify(&Notification::failure(format!("'{}' failed", name), message));
        Err(err)
    }
}
