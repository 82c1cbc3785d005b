//! Unified path management for astra client files.
//!
//! All client-local state lives under the platform config directory:
//!
//! ```text
//! ~/.config/astra/             # Config directory
//! ├── config.toml              # Backend connection settings
//! └── session.json             # Persisted bearer token + username
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for astra.
pub struct AstraPaths;

impl AstraPaths {
    /// Returns the astra configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/astra/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("astra"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session file.
    ///
    /// # Security Note
    ///
    /// The session file holds a bearer credential; it is written with
    /// permissions 600 on Unix (see `FileSessionStorage`).
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = AstraPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("astra"));
    }

    #[test]
    fn test_config_file() {
        let config_file = AstraPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = AstraPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_session_file() {
        let session_file = AstraPaths::session_file().unwrap();
        assert!(session_file.ends_with("session.json"));
        let config_dir = AstraPaths::config_dir().unwrap();
        assert!(session_file.starts_with(&config_dir));
    }
}
