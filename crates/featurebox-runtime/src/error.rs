//! Runtime error types

use featurebox_core::{CoreError, NameVariant, ResourceId};
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// CSV reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Column missing from a table
    #[error("Column {column} not found in {table}")]
    ColumnNotFound { column: String, table: String },

    /// Value could not be cast to the declared type
    #[error("Type mismatch: {0}")]
    TypeMismatch(#[from] CoreError),

    /// Resource not committed in the catalog
    #[error("Resource not found: {0}")]
    ResourceNotFound(ResourceId),

    /// No value for an entity key
    #[error("Entity {entity} has no value for key {key}")]
    EntityNotFound { entity: String, key: String },

    /// Feature keyed by a different entity than requested
    #[error("Feature {feature} is keyed by entity {actual}, not {expected}")]
    EntityMismatch {
        feature: NameVariant,
        expected: String,
        actual: String,
    },

    /// Batch size of zero
    #[error("Invalid batch size: {0}")]
    InvalidBatchSize(usize),

    /// Transformation failed
    #[error("Transformation {name} failed: {reason}")]
    Transformation { name: NameVariant, reason: String },

    /// Row with the wrong number of cells
    #[error("Row has {actual} cells, expected {expected}")]
    RowWidth { expected: usize, actual: usize },
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
