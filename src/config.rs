// Server configuration
//
// Built once at startup from defaults, an optional TOML file and CLI flags,
// then shared read-only with every request handler.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dataset::DEFAULT_SEED;
use crate::runner::DEFAULT_FRIEDMAN_SEED;

/// Configuration for the HTTP server and the sample data
///
/// # Example
/// ```
/// use nonparam::config::ServerConfig;
///
/// let config = ServerConfig::default();
/// assert_eq!(config.bind_address(), "0.0.0.0:5000");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to listen on
    pub host: String,

    /// TCP port to listen on
    pub port: u16,

    /// Verbose (TRACE) logging
    pub debug: bool,

    /// Seed of the sample dataset, re-applied on every request
    pub seed: u64,

    /// Seed of the synthetic Friedman treatments
    pub friedman_seed: u64,

    /// Rows shown in dataset and upload previews
    pub preview_rows: usize,

    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            debug: false,
            seed: DEFAULT_SEED,
            friedman_seed: DEFAULT_FRIEDMAN_SEED,
            preview_rows: 10,
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load a configuration file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        Ok(config)
    }

    /// `host:port` string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("host must not be empty".to_string());
        }

        if self.preview_rows == 0 {
            return Err("preview_rows must be >= 1".to_string());
        }

        if self.max_upload_bytes == 0 {
            return Err("max_upload_bytes must be > 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert!(!config.debug);
        assert_eq!(config.seed, 42);
        assert_eq!(config.preview_rows, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml("port = 8080\nseed = 7\n").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.seed, 7);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.preview_rows, 10);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ServerConfig::from_toml("colour = \"blue\"\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host = \"127.0.0.1\"\npreview_rows = 5").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.preview_rows, 5);
    }

    #[test]
    fn test_missing_file() {
        let err = ServerConfig::from_file(Path::new("/nonexistent/nonparam.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_preview_rows() {
        let mut config = ServerConfig::default();
        config.preview_rows = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_upload_limit() {
        let mut config = ServerConfig::default();
        config.max_upload_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_empty_host() {
        let mut config = ServerConfig::default();
        config.host = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
