//! Server configuration
//!
//! Loaded from an optional TOML file; every key has a default so an empty or
//! missing file yields a working server on 127.0.0.1:5000 that stores uploads
//! in `./uploads`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlowdConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
}

/// Listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface or hostname to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upload storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadConfig {
    /// Directory accepted images are written to, relative to the working directory
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,
    /// Largest accepted upload request body in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_upload_bytes() -> usize {
    flow_api::state::DEFAULT_MAX_UPLOAD_BYTES
}

impl FlowdConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FlowdConfig::from_toml_str("").unwrap();
        assert_eq!(config, FlowdConfig::default());
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.uploads.dir, PathBuf::from("uploads"));
        assert_eq!(config.uploads.max_upload_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = FlowdConfig::from_toml_str(
            r#"
[server]
port = 8080

[uploads]
dir = "/var/lib/flow/images"
"#,
        )
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.uploads.dir, PathBuf::from("/var/lib/flow/images"));
        assert_eq!(config.uploads.max_upload_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = FlowdConfig::from_toml_str("[server]\nprot = 80\n").unwrap_err();
        assert!(err.to_string().contains("prot"));
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("flowd.toml");
        std::fs::write(&path, "[uploads]\nmax_upload_bytes = 1024\n").unwrap();

        let config = FlowdConfig::load(&path).unwrap();
        assert_eq!(config.uploads.max_upload_bytes, 1024);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = FlowdConfig::load(Path::new("/nonexistent/flowd.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/flowd.toml"));
    }
}
