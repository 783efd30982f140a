//! Client configuration.
//!
//! Resolution order, highest priority first:
//! - `LINCTL_API_KEY` (or `LINEAR_API_KEY`), `LINCTL_ENDPOINT`, `LINCTL_TIMEOUT_SECS`
//! - `<config_dir>/linctl/config.json`
//! - built-in defaults
//!
//! The resulting [`ClientConfig`] is immutable and lives for one command
//! invocation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

/// Default GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.linear.app/graphql";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const APP_NAME: &str = "linctl";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub api_key: String,
    /// Hard deadline for a single round trip; expiry is a transport failure.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create with explicit values and the default timeout.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from the environment, falling back to the user config file.
    pub fn load() -> Result<Self> {
        let file = match config_path() {
            Some(path) => FileConfig::read(&path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge file values with environment lookups.
    pub fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("LINCTL_API_KEY")
            .or_else(|| non_empty("LINEAR_API_KEY"))
            .or(file.api_key)
            .ok_or_else(|| {
                anyhow::anyhow!("No API key configured. Set LINCTL_API_KEY or add api_key to the config file")
            })?;

        let endpoint = non_empty("LINCTL_ENDPOINT")
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout = match non_empty("LINCTL_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("Invalid LINCTL_TIMEOUT_SECS '{}'", raw))?,
            ),
            None => file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        };

        Ok(Self {
            endpoint,
            api_key,
            timeout,
        })
    }
}

/// On-disk configuration. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Read a config file. A missing file yields the empty config.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }
}

/// `<config_dir>/linctl/config.json`, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    let mut path = config_dir()?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Some(path)
}
