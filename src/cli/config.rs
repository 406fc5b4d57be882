//! Configuration file
//!
//! A single JSON object. Every key is optional:
//!
//! ```json
//! { "upload_dir": "uploads", "host": "0.0.0.0", "port": 3000, "cors_origins": [] }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::file_storage::StoreConfig;
use crate::http_server::HttpServerConfig;

/// Resolved process configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub store: StoreConfig,

    #[serde(flatten)]
    pub server: HttpServerConfig,
}

impl Config {
    /// Load configuration from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            CliError::config_error(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, upload_dir: Option<PathBuf>, port: Option<u16>) -> Self {
        if let Some(dir) = upload_dir {
            self.store.upload_dir = dir;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join("absent.json")).unwrap();
        assert_eq!(config.store.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_flat_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pdfshelf.json");
        fs::write(&path, r#"{"upload_dir": "/srv/pdfs", "port": 8081}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.store.upload_dir, PathBuf::from("/srv/pdfs"));
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pdfshelf.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code(), &super::super::errors::CliErrorCode::ConfigError);
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some(PathBuf::from("/data")), Some(9000));
        assert_eq!(config.store.upload_dir, PathBuf::from("/data"));
        assert_eq!(config.server.port, 9000);
    }
}
