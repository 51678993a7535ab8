//! CLI command handling

use std::path::PathBuf;

use colored::Colorize;

use crate::commands::Commands;
use crate::common::{Config, Result};
use crate::scenario;
use crate::webdriver::WebDriverSession;

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            config,
            endpoint,
            expected_version,
            verbose: _,
        } => {
            let mut config = load_config(config)?;
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
            }
            if let Some(version) = expected_version {
                config.expected_runtime_version = version;
            }

            let report = scenario::run(&config).await?;
            report.print_summary();

            if !report.passed() {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Status { config, endpoint } => {
            let mut config = load_config(config)?;
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
            }

            let status =
                WebDriverSession::status(&config.endpoint, config.timeouts.connect_secs).await?;
            let ready = status.ready.unwrap_or(true);
            let message = status.message.unwrap_or_default();

            if ready {
                println!("{} {} {}", "✓".green(), config.endpoint, message.dimmed());
            } else {
                println!("{} {} {}", "✗".red(), config.endpoint, message.dimmed());
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Steps => {
            println!("{}", scenario::SCENARIO_NAME.bold());
            for (index, name) in scenario::STEP_NAMES.iter().enumerate() {
                println!("  {:>2}. {}", index + 1, name);
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(&path),
        None => Config::load(),
    }
}
