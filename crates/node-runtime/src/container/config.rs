//! # Node Configuration
//!
//! Unified configuration for the gateway and the backends it is wired to.
//!
//! ## Loading order
//!
//! 1. Built-in defaults
//! 2. TOML file named by `CS_CONFIG` (optional)
//! 3. Environment overrides:
//!
//! | Variable | Field |
//! |---|---|
//! | `CS_HTTP_HOST` | `gateway.http.host` |
//! | `CS_HTTP_PORT` | `gateway.http.port` |
//! | `CS_DATA_DIR` | `storage.data_dir` |
//! | `CS_STORAGE_BACKEND` | `storage.backend` |
//!
//! Unparseable environment values are logged and ignored. A config file that
//! cannot be read or parsed is an error, as is a failed [`NodeConfig::validate`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use cs_06_api_gateway::GatewayConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "CS_CONFIG";

/// Complete node configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// API gateway configuration.
    pub gateway: GatewayConfig,
    /// State storage configuration.
    pub storage: StorageConfig,
    /// Analytics sink configuration.
    pub analytics: AnalyticsConfig,
    /// API keys issued at startup.
    pub api_keys: Vec<ApiKeySeed>,
}

impl NodeConfig {
    /// Defaults, then `CS_CONFIG`, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(CONFIG_PATH_ENV) {
            Some(path) => {
                info!(path = %path, "Loading configuration file");
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_env(lookup);
        Ok(config)
    }

    /// Parse a TOML config file. Missing sections keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = parsed(&lookup, "CS_HTTP_HOST") {
            self.gateway.http.host = host;
        }
        if let Some(port) = parsed(&lookup, "CS_HTTP_PORT") {
            self.gateway.http.port = port;
        }
        if let Some(dir) = lookup("CS_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = parsed(&lookup, "CS_STORAGE_BACKEND") {
            self.storage.backend = backend;
        }
    }

    /// Validate configuration before anything is opened or bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gateway
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.storage.backend != StorageBackend::Memory
            && self.storage.data_dir.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid(
                "storage.data_dir is required for persistent backends".into(),
            ));
        }

        if cfg!(not(feature = "rocksdb")) && self.storage.backend == StorageBackend::RocksDb {
            return Err(ConfigError::Invalid(
                "storage.backend = \"rocksdb\" requires the rocksdb feature".into(),
            ));
        }

        if self.analytics.backend == AnalyticsBackend::JsonLines
            && self.analytics.path.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid(
                "analytics.path is required for the jsonl backend".into(),
            ));
        }

        for (i, seed) in self.api_keys.iter().enumerate() {
            if seed.card_key.is_empty() || seed.secret.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "api_keys[{}]: card_key and secret must be non-empty",
                    i
                )));
            }
        }

        Ok(())
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(var = name, value = %raw, error = %e, "Ignoring invalid environment override");
            None
        }
    }
}

/// State storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Root directory of persistent backends.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from("./data"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    /// One JSON document per instance under `data_dir/state`.
    File,
    /// Only available with the `rocksdb` feature.
    RocksDb,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "rocksdb" => Ok(Self::RocksDb),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Analytics sink configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub backend: AnalyticsBackend,
    /// Event file of the `jsonl` backend.
    pub path: PathBuf,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            backend: AnalyticsBackend::Memory,
            path: PathBuf::from("./data/analytics.jsonl"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AnalyticsBackend {
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "jsonl")]
    JsonLines,
}

/// An API key issued for one card instance at startup.
#[derive(Clone, Deserialize)]
pub struct ApiKeySeed {
    pub card_key: String,
    pub secret: String,
}

impl fmt::Debug for ApiKeySeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeySeed")
            .field("card_key", &self.card_key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("invalid config file: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
