//! Operator configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use valset_election::ElectionParams;
use valset_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("power change bound {numerator}/{denominator} must be a fraction in (0, 1]")]
    InvalidBound { numerator: u64, denominator: u64 },
}

/// Configuration of the operator tool.
///
/// Loaded from a TOML file via [`ValsetConfig::from_toml_file`]; command-line
/// flags override individual fields afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValsetConfig {
    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// JSON ledger snapshot the commands operate on.
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,

    #[serde(default)]
    pub election: ElectionParams,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("./valset_ledger.json")
}

impl ValsetConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject a power change bound no election could satisfy or that
    /// divides by zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bound = self.election.power_change_bound;
        if !bound.is_valid() || bound.numerator == 0 {
            return Err(ConfigError::InvalidBound {
                numerator: bound.numerator,
                denominator: bound.denominator,
            });
        }
        Ok(())
    }
}

impl Default for ValsetConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            ledger_path: default_ledger_path(),
            election: ElectionParams::default(),
        }
    }
}
