//! Configuration file locations

use std::path::PathBuf;

/// Directory name used for configuration
const APP_NAME: &str = "openfin-e2e";

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/openfin-e2e/`
/// - macOS: `~/Library/Application Support/openfin-e2e/`
/// - Windows: `%APPDATA%\openfin-e2e\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_is_valid() {
        let dir = config_dir();
        assert!(dir.is_some());
    }
}
