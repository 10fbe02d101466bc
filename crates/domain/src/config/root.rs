use super::{ConfigError, LoggingConfig, LookupConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub lookup: LookupConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command line overrides applied on top of the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub reverse_timeout_secs: Option<u64>,
    pub cache_enabled: Option<bool>,
    pub debug: bool,
    pub log_file: Option<String>,
}

impl Config {
    /// Load configuration from an optional TOML file, then apply CLI overrides.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(Path::new(path)).map_err(|source| {
            ConfigError::FileRead {
                path: path.to_string(),
                source,
            }
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(timeout) = overrides.reverse_timeout_secs {
            self.lookup.reverse_timeout_secs = timeout;
        }
        if let Some(cache_enabled) = overrides.cache_enabled {
            self.lookup.cache_enabled = cache_enabled;
        }
        if overrides.debug {
            self.logging.level = "debug".to_string();
        }
        if let Some(log_file) = overrides.log_file {
            self.logging.file = log_file;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookup.attempts == 0 {
            return Err(ConfigError::Validation(
                "lookup.attempts must be at least 1".to_string(),
            ));
        }
        if self.lookup.attempt_timeout_secs == 0 || self.lookup.reverse_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "lookup timeouts must be greater than zero".to_string(),
            ));
        }
        if self.lookup.soa_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "lookup.soa_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.lookup.soa_server.trim().is_empty() {
            return Err(ConfigError::Validation(
                "lookup.soa_server cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
