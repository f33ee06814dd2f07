//! Configuration management for gradex.
//!
//! Loads configuration from ${GRADEX_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the grading-system backend.
    pub base_url: String,

    /// Default log filter directive (GRADEX_LOG overrides at runtime).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
    pub const DEFAULT_LOG_LEVEL: &str = "info";

    /// Loads configuration from the default config path.
    ///
    /// The `GRADEX_BASE_URL` environment variable overrides the configured
    /// base URL when set and non-empty.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        if let Ok(url) = std::env::var("GRADEX_BASE_URL")
            && !url.trim().is_empty()
        {
            config.base_url = url.trim().to_string();
        }
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Saves only the `base_url` field to a specific config file path.
    ///
    /// Creates the file if it doesn't exist. Preserves existing fields and
    /// comments using toml_edit.
    pub fn save_base_url_to(path: &Path, base_url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            String::new()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["base_url"] = value(base_url);

        Self::write_config(path, &doc.to_string())
    }

    /// Writes a default config file if none exists. Returns true if created.
    pub fn init_at(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        let contents =
            toml::to_string_pretty(&Config::default()).context("serialize default config")?;
        Self::write_config(path, &contents)?;
        Ok(true)
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

pub mod paths {
    //! Path resolution for gradex configuration and data directories.
    //!
    //! GRADEX_HOME resolution order:
    //! 1. GRADEX_HOME environment variable (if set)
    //! 2. ~/.config/gradex (default)

    use std::path::PathBuf;

    /// Returns the gradex home directory.
    pub fn gradex_home() -> PathBuf {
        if let Ok(home) = std::env::var("GRADEX_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("gradex"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        gradex_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        gradex_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.base_url, Config::DEFAULT_BASE_URL);
        assert_eq!(config.log_level, Config::DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_load_from_parses_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = \"http://backend:9000\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://backend:9000");
        // Missing fields fall back to defaults
        assert_eq!(config.log_level, Config::DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_load_from_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = [broken").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_save_base_url_preserves_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "# backend location\nbase_url = \"http://old:8080\"\nlog_level = \"debug\"\n",
        )
        .unwrap();

        Config::save_base_url_to(&path, "http://new:8080").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("# backend location"));
        assert!(contents.contains("http://new:8080"));

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://new:8080");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_init_at_creates_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(Config::init_at(&path).unwrap());
        assert!(!Config::init_at(&path).unwrap());

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, Config::DEFAULT_BASE_URL);
    }
}
