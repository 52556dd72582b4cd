//! Configuration loading and backend endpoint resolution
//!
//! Resolution priority for the backend endpoint:
//! 1. Environment variables (`GM_BACKEND_HOST`, `GM_BACKEND_PORT`)
//! 2. TOML config file
//! 3. Compiled default (`http://localhost:8001`)
//!
//! A missing or broken TOML file never prevents startup; it is logged and
//! the compiled defaults are used instead.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_BACKEND_SCHEME: &str = "http";
pub const DEFAULT_BACKEND_HOST: &str = "localhost";
pub const DEFAULT_BACKEND_PORT: u16 = 8001;
pub const DEFAULT_DETECTION_TIMEOUT_SECS: u64 = 30;

pub const ENV_BACKEND_HOST: &str = "GM_BACKEND_HOST";
pub const ENV_BACKEND_PORT: &str = "GM_BACKEND_PORT";

/// Backend server location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub scheme: String,
    pub host: String,
    pub port: u16,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_BACKEND_SCHEME.to_string(),
            host: DEFAULT_BACKEND_HOST.to_string(),
            port: DEFAULT_BACKEND_PORT,
        }
    }
}

impl BackendConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:8001`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Apply `GM_BACKEND_HOST` / `GM_BACKEND_PORT` on top of this config
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(host) = std::env::var(ENV_BACKEND_HOST) {
            let host = host.trim();
            if !host.is_empty() {
                info!("Backend host overridden by {}: {}", ENV_BACKEND_HOST, host);
                self.host = host.to_string();
            }
        }

        if let Ok(port) = std::env::var(ENV_BACKEND_PORT) {
            let parsed = port.trim().parse::<u16>().map_err(|e| {
                Error::Config(format!("{}='{}' is not a valid port: {}", ENV_BACKEND_PORT, port, e))
            })?;
            info!("Backend port overridden by {}: {}", ENV_BACKEND_PORT, parsed);
            self.port = parsed;
        }

        Ok(self)
    }
}

/// Object detection client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Request timeout; a timed-out detection falls back to manual labelling
    pub timeout_secs: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_DETECTION_TIMEOUT_SECS,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "gm_measure=debug")
    pub level: String,
    /// Append log output to this file instead of stdout
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub backend: BackendConfig,
    pub detection: DetectionConfig,
    pub logging: LoggingConfig,
}

/// Platform config file location (`<config_dir>/ganithamithura/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ganithamithura").join("config.toml"))
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load config from `path` (or the platform default), falling back to defaults
pub fn load_or_default(path: Option<&Path>) -> TomlConfig {
    let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => p,
        None => {
            warn!("Could not determine config directory, using defaults");
            return TomlConfig::default();
        }
    };

    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return TomlConfig::default();
    }

    match load_toml_config(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{}; using defaults", e);
            TomlConfig::default()
        }
    }
}

/// Resolve the backend endpoint: ENV → TOML → compiled default
pub fn resolve_backend_config(toml_config: &TomlConfig) -> Result<BackendConfig> {
    let resolved = toml_config.backend.clone().with_env_overrides()?;
    info!(base_url = %resolved.base_url(), "Backend endpoint resolved");
    Ok(resolved)
}
