//! Engine configuration.

use abilens_observability::LogConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How a failing contract affects the rest of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    /// Drop failed contracts silently (a `warn!` is still logged).
    Skip,
    /// Keep going and return every failure next to the successes.
    #[default]
    Collect,
    /// Abort on the first failure (lowest input index).
    Throw,
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Whether the EVM classifier accepts `error` items
    #[serde(default = "bool_true")]
    pub accept_error_items: bool,
    /// Max ink! wrapper-chain depth before `TypeDepthExceeded`
    #[serde(default = "default_max_type_depth")]
    pub max_type_depth: usize,
    /// Memoize EVM selectors across contracts
    #[serde(default)]
    pub cache_selectors: bool,
    /// Entries the selector cache holds before it is cleared
    #[serde(default = "default_selector_cache_capacity")]
    pub selector_cache_capacity: usize,
    #[serde(default)]
    pub error_mode: ErrorMode,
    #[serde(default)]
    pub log: LogConfig,
}

fn bool_true() -> bool { true }
fn default_max_type_depth() -> usize { abilens_ink::DEFAULT_MAX_DEPTH }
fn default_selector_cache_capacity() -> usize { abilens_evm::selector::DEFAULT_CACHE_CAPACITY }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            accept_error_items: true,
            max_type_depth: default_max_type_depth(),
            cache_selectors: false,
            selector_cache_capacity: default_selector_cache_capacity(),
            error_mode: ErrorMode::default(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a file: `.json` is parsed as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }
}
