use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use utoipa::ToSchema;

const DEFAULT_DATA_DIR: &str = ".";
const DEFAULT_PUBLIC_DIR: &str = "./public";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Provider API root, e.g. `https://api.mailjet.com`.
    pub base_url: String,
    /// Per-tenant history bound; `0` or less keeps everything.
    #[serde(default)]
    pub max_events_count: i64,
    /// Send-message defaults handed to the dashboard.
    #[serde(default)]
    pub default: BTreeMap<String, String>,
    #[serde(default = "default_data_dir", skip_serializing)]
    pub data_dir: String,
    #[serde(default = "default_public_dir", skip_serializing)]
    pub public_dir: String,
    #[serde(default = "default_upstream_timeout_secs", skip_serializing)]
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_json(&content).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|err| ConfigError::Parse {
            path: String::new(),
            message: err.to_string(),
        })
    }

    /// Store bound with non-positive values normalized to unbounded.
    pub fn max_events(&self) -> usize {
        usize::try_from(self.max_events_count).unwrap_or(0)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_public_dir() -> String {
    DEFAULT_PUBLIC_DIR.to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    DEFAULT_UPSTREAM_TIMEOUT_SECS
}
