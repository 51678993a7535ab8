//! End-to-end WebDriver test driver for the Hello OpenFin demo application
//!
//! Speaks the W3C WebDriver wire protocol to the OpenFin chromedriver:
//! opens a session, resolves application windows by title, clicks buttons
//! by id, and asserts on the runtime's reported version and exit behavior.

pub mod cli;
pub mod commands;
pub mod common;
pub mod resolver;
pub mod scenario;
pub mod webdriver;

// Re-export commonly used types for tests
pub use common::{Config, Error, Result};
pub use webdriver::WebDriverSession;
