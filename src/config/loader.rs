//! Configuration file loading.

use std::path::Path;

use crate::config::SettlementConfig;
use crate::error::{EngineError, EngineResult};

/// Loads and holds the engine configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SettlementConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] when the file does not exist.
    /// - [`EngineError::ConfigParseError`] when it is not valid YAML or
    ///   does not match the expected shape.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        let config =
            serde_yaml::from_str(&contents).map_err(|err| EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
        Ok(Self { config })
    }

    /// Wraps an already-built configuration, typically the default.
    pub fn from_config(config: SettlementConfig) -> Self {
        Self { config }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_config(SettlementConfig::default())
    }
}
