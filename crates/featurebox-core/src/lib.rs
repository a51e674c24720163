//! featurebox core - resource model shared by the featurebox crates
//!
//! This crate provides:
//! - Scalar values and declared value types
//! - Resource definitions (users, providers, entities, sources,
//!   transformations, features, labels, training sets) and their identities
//! - Structural fingerprints used to detect redefinitions
//! - The [`Catalog`] trait giving read access to committed resources
//! - Error types

pub mod catalog;
pub mod error;
pub mod fingerprint;
pub mod resource;
pub mod types;

// Re-export commonly used types
pub use catalog::Catalog;
pub use error::CoreError;
pub use fingerprint::Fingerprint;
pub use resource::{
    AggregateFunction, DataFrameTransformation, Entity, Feature, FilterOperator, Label,
    NameVariant, Provider, ProviderType, Resource, ResourceColumns, ResourceId, ResourceKind,
    Source, SourceDefinition, TrainingSet, TransformStep, User, DEFAULT_VARIANT,
};
pub use types::{Value, ValueType};
