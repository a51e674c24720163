//! Resource definitions
//!
//! Each struct holds every attribute supplied at registration. Two
//! registrations of the same identity are equal only if all of these
//! attributes are equal.

use crate::resource::transformation::DataFrameTransformation;
use crate::resource::NameVariant;
use crate::types::ValueType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A user that can own resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Storage/compute backend kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// In-process provider reading local files
    Local,
}

/// A registered provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub provider_type: ProviderType,
}

impl Provider {
    /// Name under which the local provider is registered
    pub const LOCAL_NAME: &'static str = "local-mode";

    pub fn local() -> Self {
        Self {
            name: Self::LOCAL_NAME.to_string(),
            description: "This is local mode".to_string(),
            provider_type: ProviderType::Local,
        }
    }
}

/// Join key identifying the subject of features and labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,

    #[serde(default)]
    pub description: String,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }
}

fn local_provider() -> String {
    Provider::LOCAL_NAME.to_string()
}

/// How a source produces its rows
///
/// Tagged by `type`, with the variant's fields alongside:
/// `{ type: primary_file, path: ... }` or
/// `{ type: transformation, inputs: [...], steps: [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceDefinition {
    /// CSV file with a header row
    PrimaryFile { path: PathBuf },

    /// Dataframe transformation over another source
    Transformation(DataFrameTransformation),
}

/// A dataset: either a file or a transformation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub variant: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default = "local_provider")]
    pub provider: String,

    pub definition: SourceDefinition,
}

impl Source {
    pub fn name_variant(&self) -> NameVariant {
        NameVariant::new(&self.name, &self.variant)
    }

    pub fn is_transformation(&self) -> bool {
        matches!(self.definition, SourceDefinition::Transformation(_))
    }
}

/// Columns a feature or label reads from its source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceColumns {
    /// Column holding the entity key
    pub entity: String,

    /// Column holding the value
    pub value: String,
}

/// A typed, versioned value per entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub variant: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub owner: Option<String>,

    pub source: NameVariant,
    pub entity: String,
    pub columns: ResourceColumns,

    #[serde(rename = "type")]
    pub value_type: ValueType,

    /// Provider serving this feature online
    #[serde(default)]
    pub inference_store: Option<String>,
}

impl Feature {
    pub fn name_variant(&self) -> NameVariant {
        NameVariant::new(&self.name, &self.variant)
    }
}

/// A typed, versioned ground-truth value per entity row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub variant: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub owner: Option<String>,

    pub source: NameVariant,
    pub entity: String,
    pub columns: ResourceColumns,

    #[serde(rename = "type")]
    pub value_type: ValueType,
}

impl Label {
    pub fn name_variant(&self) -> NameVariant {
        NameVariant::new(&self.name, &self.variant)
    }
}

/// A label joined with one or more features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSet {
    pub name: String,
    pub variant: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub owner: Option<String>,

    pub label: NameVariant,
    pub features: Vec<NameVariant>,
}

impl TrainingSet {
    pub fn name_variant(&self) -> NameVariant {
        NameVariant::new(&self.name, &self.variant)
    }
}
