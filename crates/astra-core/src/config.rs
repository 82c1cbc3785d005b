//! Typed client configuration.
//!
//! The backend host is deployment configuration, not part of the client
//! core; it lives in `~/.config/astra/config.toml` and falls back to the
//! local development default when the file is absent.

use serde::{Deserialize, Serialize};

/// Root configuration model (config.toml).
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AstraConfig {
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Connection settings for the intelligence backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Base URL of the backend service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout for analysis calls, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    // Standard analysis fans out to several research agents server-side;
    // responses routinely take tens of seconds.
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AstraConfig::default();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.backend.timeout_secs, 120);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: AstraConfig = toml::from_str(
            r#"
            [backend]
            base_url = "https://intel.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "https://intel.example.com");
        assert_eq!(config.backend.timeout_secs, 120);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AstraConfig = toml::from_str("").unwrap();
        assert_eq!(config, AstraConfig::default());
    }
}
