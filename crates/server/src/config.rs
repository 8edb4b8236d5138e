use std::path::Path;

use serde::{Deserialize, Serialize};

use common::prelude::StorageConfig;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Configuration loaded from the server's TOML config file.
///
/// Every section is optional; missing fields fall back to defaults so a
/// config file only needs to spell out what it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the HTTP server
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Storage engine configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Cross-origin settings
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            storage: StorageConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read(path.to_path_buf(), source))?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Allowed cross-origin access. With no origins configured the server
/// stays restrictive and cross-origin requests are blocked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub allowed_headers: Vec<String>,
    #[serde(default)]
    pub allowed_methods: Vec<String>,
    #[serde(default)]
    pub allow_credentials: bool,
}

impl CorsConfig {
    pub fn is_configured(&self) -> bool {
        !self.allowed_origins.is_empty()
    }
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Read(std::path::PathBuf, #[source] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
