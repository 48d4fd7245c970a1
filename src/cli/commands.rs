//! CLI command implementations
//!
//! `main.rs` stays minimal; everything from argument dispatch to server
//! bootstrap happens here. Boot order for `start`: load and validate the
//! inventory first (fatal on error, before any network activity), then
//! construct the gateway and controller, then bind the server.

use std::path::Path;
use std::sync::Arc;

use crate::failover::FailoverController;
use crate::gateway::{ComputeGateway, MetadataTokenProvider};
use crate::http_server::{ClusterState, HttpServer, HttpServerConfig};
use crate::inventory;
use crate::observability::Logger;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match cli.command {
        Command::Start { config, listen } => start(&config, listen.as_deref()),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Load the inventory and serve the failover API until shutdown.
pub fn start(config: &Path, listen: Option<&str>) -> CliResult<()> {
    let inventory = Arc::new(inventory::load(config)?);

    let http_config = match listen {
        Some(addr) => HttpServerConfig::from_listen_addr(addr)
            .ok_or_else(|| CliError::InvalidListenAddr(addr.to_string()))?,
        None => HttpServerConfig::default(),
    };

    Logger::info(
        "DAEMON_STARTING",
        &[
            ("project", inventory.project()),
            ("vip", &inventory.vip().to_string()),
            ("nodes", &inventory.nodes().len().to_string()),
        ],
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let tokens = Arc::new(MetadataTokenProvider::new()?);
        let gateway = Arc::new(ComputeGateway::new(tokens, inventory.project())?);
        let controller = FailoverController::new(gateway, inventory.clone());
        let state = Arc::new(ClusterState::new(inventory, controller));

        HttpServer::with_config(http_config, state)
            .start()
            .await
            .map_err(CliError::Server)
    })
}

/// Validate the inventory file and print a summary.
pub fn check_config(config: &Path) -> CliResult<()> {
    let inventory = inventory::load(config)?;

    println!("inventory ok: project={}", inventory.project());
    println!("vip: {}", inventory.vip_cidr());
    for node in inventory.nodes() {
        println!("node: {} ({})", node.name, node.zone);
    }

    Ok(())
}
