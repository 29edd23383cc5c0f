//! Catalog domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Artifact types the bridge unpacks before running
const ARCHIVE_KINDS: &[&str] = &["zip", "archive"];

/// One runnable unit published by the catalog service
///
/// Every field falls back to its default when absent, so a malformed entry
/// travels downstream partially populated instead of failing the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    /// How the artifact is treated after transfer (e.g. "zip", "binary", "script")
    pub artifact_type: String,
    /// Run by the catalog service before serving the artifact; informational on the launcher
    pub build_command: Option<String>,
    /// Server-side location of the artifact, opaque to the launcher
    pub artifact_path: String,
    /// Command line run by the bridge, relative to the materialized artifact root
    pub run_command: String,
}

impl CatalogEntry {
    /// Whether the artifact must be unpacked before `run_command` is invoked
    pub fn is_archive(&self) -> bool {
        ARCHIVE_KINDS
            .iter()
            .any(|kind| self.artifact_type.eq_ignore_ascii_case(kind))
    }

    /// The build command, if one is set and non-blank
    pub fn build_command(&self) -> Option<&str> {
        self.build_command
            .as_deref()
            .map(str::trim)
            .filter(|cmd| !cmd.is_empty())
    }
}

/// An ordered catalog fetched atomically at one point in time
///
/// Snapshots are never merged: a newer fetch replaces the held snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    entries: Vec<CatalogEntry>,
    fetched_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    /// Wraps a freshly fetched list of entries
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            fetched_at: Some(Utc::now()),
        }
    }

    /// The snapshot held before anything has been fetched
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            fetched_at: None,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries carrying `name`, in catalog order
    ///
    /// Names are not unique, so callers get every match and decide how to disambiguate.
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.name == name)
    }
}

impl Default for CatalogSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
