//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod address;
mod admin;
mod catalog;
mod script;

pub use address::AddressCommands;
pub use admin::AdminCommands;

use anyhow::Result;
use clap::Subcommand;
use launchpad_bridge::{ExecutionBridge, LocalExecutionBridge, ServerAddressStore};
use launchpad_client::LaunchpadClient;
use std::sync::Arc;

use crate::config::Config;
use crate::console::ConsoleNotifier;
use crate::repository::HttpRepository;
use crate::workflow::Orchestrator;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the applications published by the server
    List,
    /// Show details of one application
    Show {
        /// Application name
        name: String,

        /// Which of several applications sharing the name (1-based)
        #[arg(long)]
        index: Option<usize>,
    },
    /// Download an application and run it locally
    Run {
        /// Application name
        name: String,

        /// Which of several applications sharing the name (1-based)
        #[arg(long)]
        index: Option<usize>,
    },
    /// Show or change the saved server address
    Address {
        #[command(subcommand)]
        command: AddressCommands,
    },
    /// Run a script staged on the server (shell, python, ruby, c, binary)
    Script {
        /// Script language
        language: String,

        /// Path of the script on the server (for shell, the command to run)
        filename: String,
    },
    /// Administer the catalog server
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

/// Everything a command handler needs, wired once per invocation
pub struct Context {
    pub config: Config,
    pub address: Arc<ServerAddressStore>,
    pub client: LaunchpadClient,
    pub bridge: Arc<dyn ExecutionBridge>,
}

impl Context {
    /// Loads the saved server address, applying the per-invocation override
    pub fn new(config: Config) -> Self {
        let address = Arc::new(ServerAddressStore::load_from_dir(&config.config_dir));
        if let Some(server_address) = &config.server_address {
            address.use_for_session(server_address);
        }

        let client = LaunchpadClient::new();
        let bridge = Arc::new(LocalExecutionBridge::new(client.clone(), address.clone()));

        Self {
            config,
            address,
            client,
            bridge,
        }
    }

    pub fn orchestrator(&self) -> Orchestrator {
        let repository = Arc::new(HttpRepository::new(self.client.clone()));

        Orchestrator::new(
            repository.clone(),
            repository,
            self.bridge.clone(),
            self.address.clone(),
            Arc::new(ConsoleNotifier),
        )
    }

    /// Base URL of the admin API
    pub fn admin_url(&self) -> String {
        self.config
            .admin_url
            .clone()
            .unwrap_or_else(|| self.address.get())
    }
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
///
/// # Returns
/// Result indicating success or failure
pub async fn handle_command(command: Commands, config: Config) -> Result<()> {
    let context = Context::new(config);

    match command {
        Commands::List => catalog::list_applications(&context).await,
        Commands::Show { name, index } => catalog::show_application(&context, &name, index).await,
        Commands::Run { name, index } => catalog::run_application(&context, &name, index).await,
        Commands::Address { command } => address::handle_address_command(command, &context).await,
        Commands::Script { language, filename } => {
            script::run_script(&context, &language, &filename).await
        }
        Commands::Admin { command } => admin::handle_admin_command(command, &context).await,
    }
}
