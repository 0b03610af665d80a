use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for a conversion run.
///
/// Loaded from `canon.toml` in the corpus root when present; every field has
/// a default so the file is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File extension of book source files under the root.
    pub extension: String,

    /// Whether JSON output is pretty-printed.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension: "usfm".to_string(),
            pretty: false,
        }
    }
}

impl Config {
    /// The configuration file name looked up in the corpus root.
    pub const FILE_NAME: &'static str = "canon.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or
    /// if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Loads the configuration from [`Config::FILE_NAME`] under `root`,
    /// falling back to defaults when the file is absent or invalid.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        let path = root.join(Self::FILE_NAME);
        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.extension, "usfm");
        assert!(!config.pretty);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(Config::FILE_NAME);

        let config = Config {
            extension: "txt".to_string(),
            pretty: true,
        };
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn load_or_default_when_absent() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::load_or_default(dir.path()), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(Config::FILE_NAME);
        std::fs::write(&path, "pretty = true\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.extension, "usfm");
        assert!(config.pretty);
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(Config::FILE_NAME), "not = [valid").unwrap();

        assert_eq!(Config::load_or_default(dir.path()), Config::default());
    }
}
