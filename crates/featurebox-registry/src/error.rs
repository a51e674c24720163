//! Error types for the registry layer

use featurebox_core::{CoreError, ResourceId};
use thiserror::Error;

/// Result type alias for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur while registering or applying resources
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Same identity registered with a different definition
    #[error("Resource redefined: {id} has conflicting {}", .changed.join(", "))]
    ResourceRedefined { id: ResourceId, changed: Vec<String> },

    /// A referenced resource is neither committed nor in the applied batch
    #[error("{resource} depends on missing {dependency}")]
    MissingDependency {
        resource: ResourceId,
        dependency: ResourceId,
    },

    /// Definition rejected by validation
    #[error("Invalid definition for {id}: {reason}")]
    InvalidDefinition { id: ResourceId, reason: String },

    /// Resource not found in the committed set
    #[error("Resource not found: {0}")]
    NotFound(ResourceId),

    /// Error from the core model (fingerprints, casts)
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    /// I/O error reading a manifest
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error in a manifest
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

impl RegistryError {
    pub fn is_redefinition(&self) -> bool {
        matches!(self, RegistryError::ResourceRedefined { .. })
    }
}
