//! CLI command definitions

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Hello OpenFin scenario against the configured endpoint
    Run {
        /// Path to a config file (default: platform config dir)
        #[arg(long)]
        config: Option<PathBuf>,

        /// WebDriver endpoint URL (overrides config)
        #[arg(long)]
        endpoint: Option<String>,

        /// Runtime version the app is expected to report (overrides config)
        #[arg(long)]
        expected_version: Option<String>,

        /// Log wire traffic
        #[arg(long, short)]
        verbose: bool,
    },

    /// Probe the WebDriver endpoint's readiness
    Status {
        /// Path to a config file (default: platform config dir)
        #[arg(long)]
        config: Option<PathBuf>,

        /// WebDriver endpoint URL (overrides config)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// List the scenario's steps in execution order
    Steps,
}
