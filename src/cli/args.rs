//! CLI argument definitions using clap
//!
//! Commands:
//! - vipd start --config <path> [--listen <host:port>]
//! - vipd check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vipd - floating-VIP failover orchestrator for GCE alias IP ranges
#[derive(Parser, Debug)]
#[command(name = "vipd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the cluster inventory and serve the failover API
    Start {
        /// Path to the cluster inventory file
        #[arg(long, default_value = "./cluster_conf.yaml")]
        config: PathBuf,

        /// Listen address, host:port (default 0.0.0.0:8080)
        #[arg(long)]
        listen: Option<String>,
    },

    /// Validate the cluster inventory file and exit
    CheckConfig {
        /// Path to the cluster inventory file
        #[arg(long, default_value = "./cluster_conf.yaml")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
