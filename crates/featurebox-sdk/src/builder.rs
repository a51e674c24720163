//! Builder pattern for Client

use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::Result;
use std::path::PathBuf;

/// Builder for [`Client`]
///
/// # Example
///
/// ```rust,no_run
/// use featurebox_sdk::ClientBuilder;
///
/// // Explicit settings
/// let client = ClientBuilder::new()
///     .with_data_dir("data")
///     .with_default_owner("featureformer")
///     .build();
///
/// // From .env, config/featurebox.* and FEATUREBOX_* variables
/// let client = ClientBuilder::from_env()?.build();
/// # Ok::<(), featurebox_sdk::SdkError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the loaded environment configuration
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            config: ClientConfig::load()?,
        })
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Directory that relative file source paths resolve against
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = Some(dir.into());
        self
    }

    pub fn with_cache_sources(mut self, enabled: bool) -> Self {
        self.config.cache_sources = enabled;
        self
    }

    pub fn with_default_owner(mut self, owner: impl Into<String>) -> Self {
        self.config.default_owner = Some(owner.into());
        self
    }

    pub fn build(self) -> Client {
        Client::from_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_builder_settings() {
        let client = ClientBuilder::new()
            .with_data_dir("data")
            .with_cache_sources(false)
            .with_default_owner("featureformer")
            .build();

        let config = client.config();
        assert_eq!(config.data_dir.as_deref(), Some(Path::new("data")));
        assert!(!config.cache_sources);
        assert_eq!(config.default_owner.as_deref(), Some("featureformer"));
    }

    #[test]
    fn test_with_config_then_override() {
        let client = ClientBuilder::new()
            .with_config(ClientConfig::new().with_data_dir("a"))
            .with_data_dir("b")
            .build();
        assert_eq!(client.config().data_dir.as_deref(), Some(Path::new("b")));
    }
}
