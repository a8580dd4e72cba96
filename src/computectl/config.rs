use crate::error::{ComputectlError, Result};
use crate::resolve::NameResolution;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENDPOINT_ENV: &str = "COMPUTECTL_ENDPOINT";
pub const TOKEN_ENV: &str = "COMPUTECTL_TOKEN";

/// Configuration for computectl, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ComputectlConfig {
    /// Compute API base URL, e.g. `https://compute.example.com/v2.1/<project>`
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Pre-issued auth token sent as `X-Auth-Token`
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Where image/flavor names are turned into IDs
    #[serde(default)]
    pub name_resolution: NameResolution,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ComputectlConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            name_resolution: NameResolution::default(),
        }
    }
}

impl ComputectlConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ComputectlConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Environment variables win over the file.
    pub fn with_env_overrides<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = var(ENDPOINT_ENV).filter(|s| !s.is_empty()) {
            self.endpoint = Some(endpoint);
        }
        if let Some(token) = var(TOKEN_ENV) {
            self.token = Some(token);
        }
        self
    }

    pub fn endpoint(&self) -> Result<&str> {
        self.endpoint.as_deref().ok_or_else(|| {
            ComputectlError::Config(format!(
                "no compute endpoint configured; set {} or \"endpoint\" in {}",
                ENDPOINT_ENV, CONFIG_FILENAME
            ))
        })
    }
}
