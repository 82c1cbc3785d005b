//! Client configuration file storage.
//!
//! Loads `config.toml` into the typed [`AstraConfig`] model. A missing
//! file is not an error — the client runs against defaults until the user
//! writes a config.

use crate::paths::AstraPaths;
use astra_core::config::AstraConfig;
use astra_core::error::{AstraError, Result};
use std::fs;
use std::path::PathBuf;

/// Storage for the client configuration file.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates storage at the default path (`~/.config/astra/config.toml`).
    pub fn new() -> Result<Self> {
        let path = AstraPaths::config_file()
            .map_err(|err| AstraError::config(err.to_string()))?;
        Ok(Self { path })
    }

    /// Creates storage at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration, falling back to defaults when the file is
    /// absent or empty. Invalid TOML is a real error — silently ignoring a
    /// typo'd backend URL would send every request to the default host.
    pub fn load(&self) -> Result<AstraConfig> {
        if !self.path.exists() {
            return Ok(AstraConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AstraConfig::default());
        }

        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(storage.load().unwrap(), AstraConfig::default());
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [backend]
            base_url = "https://intel.example.com"
            timeout_secs = 30
            "#,
        )
        .unwrap();

        let config = ConfigStorage::with_path(path).load().unwrap();
        assert_eq!(config.backend.base_url, "https://intel.example.com");
        assert_eq!(config.backend.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "backend = not toml").unwrap();

        assert!(ConfigStorage::with_path(path).load().is_err());
    }
}
