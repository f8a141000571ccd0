use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the generation service. Absent means degraded mode.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Field of an error body that carries the service's description.
    #[serde(default = "default_error_field")]
    pub error_field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    #[serde(default = "default_session_key")]
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Config {
    /// True when no generation service is configured.
    pub fn is_degraded(&self) -> bool {
        self.backend.base_url().is_none()
    }
}

impl BackendConfig {
    /// Configured base URL with any trailing slash removed, or `None` when
    /// unset or blank.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            error_field: default_error_field(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            key: default_session_key(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_error_field() -> String {
    "detail".to_string()
}

fn default_storage_path() -> String {
    ".whatif/session.json".to_string()
}

fn default_session_key() -> String {
    "whatif_session_id".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
