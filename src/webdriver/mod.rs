//! W3C WebDriver wire protocol client
//!
//! This module implements the client side of the handful of WebDriver
//! commands the scenario needs: session lifecycle, window handling,
//! id-based element lookup, clicks, and script execution.

pub mod session;
pub mod types;

pub use session::WebDriverSession;
pub use types::{Capabilities, Element, WindowHandle};
