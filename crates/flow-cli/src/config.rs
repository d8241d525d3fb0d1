//! Settings for flow-cli
//!
//! Read from `~/.config/flow-cli/config.toml` (or `--config`); every key is
//! optional and command-line flags take precedence:
//!
//! ```toml
//! [server]
//! url = "http://127.0.0.1:5000"
//! timeout_secs = 30
//!
//! [output]
//! format = "json"
//! no_color = true
//!
//! [process]
//! prompt = "Explain this code"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::output::OutputFormat;

/// Server used when neither a flag nor the config file names one
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

/// Request timeout used when neither a flag nor the config file sets one
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server: ServerSection,
    pub output: OutputSection,
    pub process: ProcessSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub format: Option<OutputFormat>,
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessSection {
    /// Prompt sent by `process` when neither `--prompt` nor `--message` is given
    pub prompt: Option<String>,
}

/// Values given on the command line
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub server: Option<&'a str>,
    pub timeout_secs: Option<u64>,
    pub format: Option<OutputFormat>,
    pub no_color: bool,
}

/// Settings after applying command-line flags over the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: String,
    pub timeout: Duration,
    pub format: OutputFormat,
    pub no_color: bool,
    pub default_prompt: Option<String>,
}

impl FileConfig {
    /// `~/.config/flow-cli/config.toml` on Linux, the platform equivalent elsewhere
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("flow-cli").join("config.toml"))
    }

    /// Load an explicit config file, or the default one if it exists.
    ///
    /// An explicit path must exist; a missing default file means no settings.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn resolve(self, overrides: Overrides<'_>) -> Settings {
        let timeout_secs = overrides
            .timeout_secs
            .or(self.server.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Settings {
            server: overrides
                .server
                .map(String::from)
                .or(self.server.url)
                .unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            format: overrides.format.or(self.output.format).unwrap_or_default(),
            no_color: overrides.no_color || self.output.no_color,
            default_prompt: self.process.prompt,
        }
    }
}
