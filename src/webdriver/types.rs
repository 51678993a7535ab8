//! WebDriver wire message types
//!
//! These types represent the W3C WebDriver protocol messages this driver
//! uses. See: https://www.w3.org/TR/webdriver/
//!
//! The OpenFin toolchain pins chromedriver builds that predate the W3C
//! standard, so decoding also accepts the legacy JSON wire shapes (top-level
//! `sessionId`, `ELEMENT` element keys).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::config::LaunchConfig;

/// W3C element identifier key
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Element location strategy used by this driver (id lookup via css)
pub const CSS_SELECTOR: &str = "css selector";

// === Capabilities ===

/// Chromium launch options, sent under `goog:chromeOptions`
#[derive(Debug, Clone, Serialize, Default)]
pub struct ChromeOptions {
    /// Launcher binary; for OpenFin this is the RVM launcher script,
    /// not the runtime executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Always present, even when empty; older chromedrivers require it
    pub extensions: Vec<String>,
}

/// Capability set describing how the remote end attaches to the application
#[derive(Debug, Clone, Serialize, Default)]
pub struct Capabilities {
    #[serde(rename = "goog:chromeOptions", skip_serializing_if = "Option::is_none")]
    pub chrome_options: Option<ChromeOptions>,
}

impl From<&LaunchConfig> for Capabilities {
    fn from(launch: &LaunchConfig) -> Self {
        Self {
            chrome_options: Some(ChromeOptions {
                binary: launch.binary.clone(),
                args: launch.args.clone(),
                extensions: Vec::new(),
            }),
        }
    }
}

// === Requests ===

/// Body of `POST /session`
#[derive(Debug, Serialize)]
pub struct NewSessionRequest {
    pub capabilities: CapabilityNegotiation,
}

#[derive(Debug, Serialize)]
pub struct CapabilityNegotiation {
    #[serde(rename = "alwaysMatch")]
    pub always_match: Capabilities,
}

impl NewSessionRequest {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities: CapabilityNegotiation {
                always_match: capabilities,
            },
        }
    }
}

/// Body of `POST /session/{id}/timeouts`, all values in milliseconds
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeoutsRequest {
    pub implicit: u64,
    pub page_load: u64,
    pub script: u64,
}

/// Body of `POST /session/{id}/window`
///
/// W3C remote ends read `handle`; legacy ones read `name`. Both carry the
/// same value so either vintage accepts the request.
#[derive(Debug, Serialize)]
pub struct SwitchWindowRequest<'a> {
    pub handle: &'a str,
    pub name: &'a str,
}

impl<'a> SwitchWindowRequest<'a> {
    pub fn new(handle: &'a str) -> Self {
        Self {
            handle,
            name: handle,
        }
    }
}

/// Body of `POST /session/{id}/elements`
#[derive(Debug, Serialize)]
pub struct LocatorRequest {
    pub using: &'static str,
    pub value: String,
}

impl LocatorRequest {
    /// Locate by element id, expressed as a css selector
    pub fn by_id(id: &str) -> Self {
        Self {
            using: CSS_SELECTOR,
            value: format!("#{id}"),
        }
    }
}

/// Body of `POST /session/{id}/execute/{sync,async}`
#[derive(Debug, Serialize)]
pub struct ExecuteRequest {
    pub script: String,
    pub args: Vec<Value>,
}

impl ExecuteRequest {
    pub fn new(script: &str) -> Self {
        Self {
            script: script.to_string(),
            args: Vec::new(),
        }
    }
}

// === Replies ===

/// Error payload carried in the `value` field of a failed command reply
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorValue {
    pub error: String,
    #[serde(default)]
    pub message: String,
}

/// `value` payload of a successful `POST /session` reply
#[derive(Debug, Deserialize)]
pub struct NewSessionValue {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub capabilities: Value,
}

/// `value` payload of `GET /status`
#[derive(Debug, Deserialize)]
pub struct StatusValue {
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

// === Domain handles ===

/// Backend-assigned identifier for one open top-level window
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(pub String);

impl std::fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Reference to a UI element, valid only within the window context in
/// which it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: String,
}

/// Wire shape of an element reference
#[derive(Debug, Deserialize)]
pub struct ElementRef {
    #[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
    w3c: Option<String>,
    #[serde(rename = "ELEMENT")]
    legacy: Option<String>,
}

impl ElementRef {
    /// Extract the element id, preferring the W3C key
    pub fn into_element(self) -> Option<Element> {
        self.w3c
            .or(self.legacy)
            .map(|id| Element { id })
    }
}
