//! Configuration for the aqi front-ends
//!
//! Resolution order for [`AqiConfig::load`]:
//! 1. An explicit path (error if unreadable)
//! 2. `./aqi.toml`
//! 3. `<config dir>/aqi/config.toml`
//! 4. Built-in defaults
//!
//! `AQI_MODEL_PATH` and `AQI_ADDR` override the loaded values.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "aqi.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AqiConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Regression artifact settings
    pub model: ModelConfig,
    /// HTTP adapter settings
    pub server: ServerConfig,
    /// File this configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for AqiConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            model: ModelConfig::default(),
            server: ServerConfig::default(),
            source: None,
        }
    }
}

/// Values taken from `AQI_MODEL_PATH` and `AQI_ADDR`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub model_path: Option<PathBuf>,
    pub addr: Option<String>,
}

impl EnvOverrides {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self {
            model_path: std::env::var_os("AQI_MODEL_PATH").map(PathBuf::from),
            addr: std::env::var("AQI_ADDR").ok(),
        }
    }
}

/// Model artifact configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the JSON linear-model artifact
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/linear_regression_pm25.json"),
        }
    }
}

/// HTTP adapter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl AqiConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut config = Self::from_toml(&content)?;
        config.validate()?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Standard lookup locations, most specific first.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("aqi").join("config.toml"));
        }
        paths
    }

    /// Resolve configuration from `explicit` or the standard locations,
    /// then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(explicit, &Self::search_paths(), EnvOverrides::from_env())
    }

    /// [`AqiConfig::load`] with the search paths and overrides supplied.
    ///
    /// The first existing file in `search` wins; [`AqiConfig::source`]
    /// records which one was used.
    pub fn load_from(
        explicit: Option<&Path>,
        search: &[PathBuf],
        env: EnvOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match search.iter().find(|p| p.is_file()) {
                Some(path) => Self::from_file(path)?,
                None => Self::default(),
            },
        };

        config.apply_overrides(env.model_path, env.addr);
        config.validate()?;
        Ok(config)
    }

    /// Replace the model path and listen address when given.
    pub fn apply_overrides(&mut self, model_path: Option<PathBuf>, addr: Option<String>) {
        if let Some(path) = model_path {
            self.model.path = path;
        }
        if let Some(addr) = addr {
            self.server.addr = addr;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "model.path must not be empty".to_string(),
            ));
        }

        if self.server.addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "server.addr '{}' is not a socket address",
                self.server.addr
            )));
        }

        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "log_filter must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
