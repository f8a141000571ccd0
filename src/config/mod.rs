mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, io::ErrorKind, path::Path};
use tracing::debug;

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const BACKEND_URL_ENV: &str = "WHATIF_BACKEND_URL";

pub async fn load() -> Result<Config> {
    let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.yaml".to_string());
    let mut config = load_from(&config_path).await?;
    apply_backend_override(&mut config, env::var(BACKEND_URL_ENV).ok());
    Ok(config)
}

/// Replaces the configured backend URL. An empty override forces degraded mode.
pub fn apply_backend_override(config: &mut Config, url: Option<String>) {
    if let Some(url) = url {
        debug!("Backend URL overridden by {}", BACKEND_URL_ENV);
        config.backend.base_url = Some(url);
    }
}

/// Reads a YAML config file. A missing file yields the defaults.
pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = match tokio::fs::read_to_string(path).await {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(Error::config(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )));
        }
    };

    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(&config_str)?;
    Ok(config)
}
