//! Catalog service runtime configuration

use serde::{Deserialize, Serialize};

/// Port the catalog service listens on when no config file exists
pub const DEFAULT_PORT: &str = "8080";

/// Runtime configuration of the catalog service
///
/// The port is kept as a string on the wire; the admin surface edits it as free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRuntimeConfig {
    pub port: String,
}

impl ServerRuntimeConfig {
    pub fn new(port: impl Into<String>) -> Self {
        Self { port: port.into() }
    }

    /// Parses the port for binding
    pub fn port_number(&self) -> Option<u16> {
        self.port.trim().parse().ok()
    }
}

impl Default for ServerRuntimeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PORT)
    }
}
