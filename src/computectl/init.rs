use crate::api::ComputeApi;
use crate::compute::http::HttpCompute;
use crate::config::ComputectlConfig;
use crate::error::{ComputectlError, Result};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub const HOME_ENV: &str = "COMPUTECTL_HOME";

/// `$COMPUTECTL_HOME` if set, else the platform config directory.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "computectl", "computectl")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ComputectlError::Config("could not determine config directory".into()))
}

pub fn load_config() -> Result<ComputectlConfig> {
    let dir = config_dir()?;
    debug!(dir = %dir.display(), "loading configuration");
    Ok(ComputectlConfig::load(&dir)?.with_env_overrides(|k| std::env::var(k).ok()))
}

/// Builds the API against the configured endpoint. Fails with a `Config`
/// error when no endpoint is set.
pub fn initialize() -> Result<ComputeApi<HttpCompute>> {
    let config = load_config()?;
    let client = HttpCompute::new(
        config.endpoint()?,
        config.token.as_deref().unwrap_or_default(),
        Duration::from_secs(config.timeout_secs),
    )?;
    Ok(ComputeApi::new(client, config.name_resolution))
}
