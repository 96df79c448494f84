//! Bridge configuration
//!
//! Layered with figment: built-in defaults, then an optional TOML file, then
//! `SHA1DC_`-prefixed environment variables.

use crate::error::ConfigError;
use crate::ingest::IngestStrategy;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variables read by [`BridgeConfig::figment`]
pub const ENV_PREFIX: &str = "SHA1DC_";

/// Process-wide bridge settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Strategy new sessions start with
    pub default_strategy: IngestStrategy,
    /// Upper bound on live sessions; allocation past it yields a null handle
    pub max_sessions: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_strategy: IngestStrategy::Copy,
            max_sessions: 64 * 1024,
        }
    }
}

impl BridgeConfig {
    /// Defaults overlaid with the environment
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Defaults, then `path` if it exists, then the environment
    pub fn figment_with_file(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Extract and validate a configuration
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration from defaults and the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_sessions == 0 {
            return Err(ConfigError::invalid_value(
                "max_sessions",
                "must allow at least one session",
            ));
        }
        Ok(())
    }
}
