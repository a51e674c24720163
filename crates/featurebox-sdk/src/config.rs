//! Client configuration

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a featurebox [`Client`](crate::Client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Directory relative file source paths resolve against
    pub data_dir: Option<PathBuf>,

    /// Cache loaded source tables
    pub cache_sources: bool,

    /// Owner given to resources registered without one
    pub default_owner: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            cache_sources: true,
            default_owner: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_cache_sources(mut self, enabled: bool) -> Self {
        self.cache_sources = enabled;
        self
    }

    pub fn with_default_owner(mut self, owner: impl Into<String>) -> Self {
        self.default_owner = Some(owner.into());
        self
    }

    /// Load configuration from `.env`, `config/featurebox.*` and
    /// `FEATUREBOX_*` environment variables
    pub fn load() -> Result<Self> {
        Self::load_from("config/featurebox")
    }

    /// Load configuration using `file` as the optional config file
    pub fn load_from(file: &str) -> Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix("FEATUREBOX").try_parsing(true))
            .build()
            .map_err(|e| SdkError::Config(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| SdkError::Config(format!("Failed to deserialize config: {}", e)))?;

        tracing::debug!(config = ?loaded, "Loaded client configuration");
        Ok(loaded)
    }
}
