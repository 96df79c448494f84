use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use sha1dc_bridge_core::{BridgeConfig, IngestStrategy};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "sha1dc.toml";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub bridge: BridgeConfig,

    #[serde(default)]
    pub hash: HashConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HashConfig {
    /// Bytes read from the input per region handed to the bridge
    pub chunk_size: usize,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            chunk_size: 64 * 1024,
        }
    }
}

impl AppConfig {
    /// Load configuration with layered priority: ENV > File > Defaults
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    figment = figment.merge(Toml::file(default_path));
                }
            }
        }

        figment = figment.merge(Env::prefixed("SHA1DC_").split("__"));

        let config: AppConfig = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI argument overrides to the configuration
    pub fn apply_cli_overrides(&mut self, strategy: Option<IngestStrategy>, chunk_size: Option<usize>) {
        if let Some(strategy) = strategy {
            self.bridge.default_strategy = strategy;
        }
        if let Some(size) = chunk_size {
            self.hash.chunk_size = size;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bridge.validate()?;
        // Regions are addressed with signed 32-bit lengths
        if self.hash.chunk_size == 0 || self.hash.chunk_size > i32::MAX as usize {
            anyhow::bail!(
                "hash.chunk_size must be between 1 and {}, got {}",
                i32::MAX,
                self.hash.chunk_size
            );
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
