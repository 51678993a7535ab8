//! Configuration file handling

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize)]
pub struct Config {
    /// WebDriver remote endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Runtime version the application is expected to report
    #[serde(default = "default_expected_version")]
    pub expected_runtime_version: String,

    /// How the remote end launches the application
    #[serde(default)]
    pub launch: LaunchConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            expected_runtime_version: default_expected_version(),
            launch: LaunchConfig::default(),
            timeouts: Timeouts::default(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9515".to_string()
}

fn default_expected_version() -> String {
    "9.61.34.45".to_string()
}

/// Launch options forwarded to the remote end as `goog:chromeOptions`.
///
/// The OpenFin chromedriver does not start the application itself; the
/// capability set points it at the RVM launcher script instead.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LaunchConfig {
    /// Launcher binary (e.g. `RunOpenFin.bat`)
    pub binary: Option<String>,

    /// Arguments for the launcher (e.g. `--config=app.json`)
    #[serde(default)]
    pub args: Vec<String>,
}

/// Timeout settings
///
/// The millisecond values are forwarded to the remote end's session timeout
/// configuration; the second values bound waits on our side.
#[derive(Debug, Deserialize, Clone)]
pub struct Timeouts {
    /// Implicit element-lookup wait, forwarded to the remote end
    #[serde(default = "default_session_ms")]
    pub implicit_ms: u64,

    /// Page-load wait, forwarded to the remote end
    #[serde(default = "default_session_ms")]
    pub page_load_ms: u64,

    /// Script-execution wait, forwarded to the remote end
    #[serde(default = "default_session_ms")]
    pub script_ms: u64,

    /// TCP connect timeout for reaching the endpoint
    #[serde(default = "default_connect")]
    pub connect_secs: u64,

    /// Overall wall-clock bound for the whole scenario
    #[serde(default = "default_scenario")]
    pub scenario_secs: u64,

    /// Settle pause after clicks that open or close windows.
    ///
    /// A fixed pause is a known flakiness risk on slow backends.
    #[serde(default = "default_settle")]
    pub settle_ms: u64,

    /// Pause between window-enumeration passes in the resolver
    #[serde(default = "default_poll")]
    pub poll_ms: u64,

    /// Bound on session close
    #[serde(default = "default_close")]
    pub close_secs: u64,

    /// Bound on the final termination check
    #[serde(default = "default_termination")]
    pub termination_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            implicit_ms: default_session_ms(),
            page_load_ms: default_session_ms(),
            script_ms: default_session_ms(),
            connect_secs: default_connect(),
            scenario_secs: default_scenario(),
            settle_ms: default_settle(),
            poll_ms: default_poll(),
            close_secs: default_close(),
            termination_secs: default_termination(),
        }
    }
}

fn default_session_ms() -> u64 {
    30_000
}
fn default_connect() -> u64 {
    5
}
fn default_scenario() -> u64 {
    120
}
fn default_settle() -> u64 {
    3_000
}
fn default_poll() -> u64 {
    500
}
fn default_close() -> u64 {
    10
}
fn default_termination() -> u64 {
    10
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if the file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            super::Error::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}
