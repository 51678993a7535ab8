//! Error types for the OpenFin end-to-end driver
//!
//! Wire-level failures reported by the remote end are classified into this
//! taxonomy in `webdriver::session`, so scenario code only ever deals with
//! these variants.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the end-to-end driver
#[derive(Error, Debug)]
pub enum Error {
    // === Connection Errors ===
    #[error("Failed to reach WebDriver endpoint '{endpoint}': {reason}")]
    Connection { endpoint: String, reason: String },

    #[error("Remote end rejected the session request: {0}")]
    SessionRejected(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // === Session Errors ===
    #[error("Session is already closed")]
    SessionClosed,

    #[error("Remote end no longer knows this session: {0}")]
    SessionGone(String),

    // === Timeout Errors ===
    #[error("Scenario timed out after {0} seconds")]
    ScenarioTimeout(u64),

    #[error("Script did not signal completion within the script timeout: {0}")]
    ScriptTimeout(String),

    #[error("Session close did not finish within {0} seconds")]
    CloseTimeout(u64),

    #[error("Remote end timed out executing '{command}': {message}")]
    RemoteTimeout { command: String, message: String },

    #[error("Application did not terminate within {0} seconds")]
    TerminationTimeout(u64),

    // === Window Errors ===
    #[error("No window titled '{title}' found after {passes} enumeration passes")]
    WindowNotFound { title: String, passes: u32 },

    #[error("Focused window is gone: {0}")]
    WindowGone(String),

    // === Element Errors ===
    #[error("Expected element '#{id}' was not found in the focused window")]
    ElementNotFound { id: String },

    // === Script Errors ===
    #[error("In-window script failed: {0}")]
    Script(String),

    // === Assertion Errors ===
    #[error("Assertion failed in step '{step}': expected '{expected}', got '{actual}'")]
    Assertion {
        step: String,
        expected: String,
        actual: String,
    },

    // === Protocol Errors ===
    #[error("WebDriver command '{command}' failed ({code}): {message}")]
    CommandFailed {
        command: String,
        code: String,
        message: String,
    },

    #[error("Malformed WebDriver reply: {0}")]
    Protocol(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a connection error for an unreachable or misbehaving endpoint
    pub fn connection(endpoint: &str, reason: impl ToString) -> Self {
        Self::Connection {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a command failed error from a wire-level error envelope
    pub fn command_failed(command: &str, code: &str, message: &str) -> Self {
        Self::CommandFailed {
            command: command.to_string(),
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an assertion error with the expected and actual values
    pub fn assertion(step: &str, expected: &str, actual: &str) -> Self {
        Self::Assertion {
            step: step.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Whether this error means the remote end no longer has the session.
    ///
    /// Close treats an already-gone session as success, and the termination
    /// check treats it as the expected outcome.
    pub fn is_session_gone(&self) -> bool {
        matches!(self, Self::SessionGone(_) | Self::SessionClosed)
    }
}
