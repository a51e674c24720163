//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registry error (redefinitions, missing dependencies, manifests)
    #[error("Registry error: {0}")]
    Registry(#[from] featurebox_registry::RegistryError),

    /// Runtime error (sources, materialization, serving)
    #[error("Runtime error: {0}")]
    Runtime(#[from] featurebox_runtime::RuntimeError),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] featurebox_core::CoreError),

    /// A thread panicked while holding client state
    #[error("Lock poisoned: {0}")]
    LockPoisoned(&'static str),
}

impl SdkError {
    /// True for a conflicting re-registration rejected by `apply`
    pub fn is_redefinition(&self) -> bool {
        matches!(self, SdkError::Registry(e) if e.is_redefinition())
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use featurebox_core::{NameVariant, ResourceId};
    use featurebox_registry::RegistryError;
    use featurebox_runtime::RuntimeError;

    #[test]
    fn test_config_error() {
        let error = SdkError::Config("invalid data_dir".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid data_dir");
    }

    #[test]
    fn test_registry_conversion() {
        let error: SdkError = RegistryError::ResourceRedefined {
            id: ResourceId::feature(&NameVariant::new("avg_transactions", "quickstart")),
            changed: vec!["type".to_string()],
        }
        .into();
        assert!(error.is_redefinition());
        assert!(error.to_string().starts_with("Registry error: Resource redefined"));
    }

    #[test]
    fn test_runtime_conversion() {
        let error: SdkError = RuntimeError::InvalidBatchSize(0).into();
        assert!(!error.is_redefinition());
        assert_eq!(error.to_string(), "Runtime error: Invalid batch size: 0");
    }

    #[test]
    fn test_lock_poisoned() {
        let error = SdkError::LockPoisoned("registry");
        assert_eq!(error.to_string(), "Lock poisoned: registry");
    }
}
