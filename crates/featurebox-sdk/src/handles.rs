//! Registration handles and argument types
//!
//! Handles are returned by the [`Client`] registration calls and carry just
//! enough identity to register dependent resources: a [`LocalProvider`]
//! registers sources, a [`SourceHandle`] registers features and labels read
//! from that source.

use crate::client::Client;
use crate::error::Result;
use featurebox_core::{
    DataFrameTransformation, Feature, Label, NameVariant, Provider, ResourceColumns, ResourceId,
    Source, SourceDefinition, TrainingSet, ValueType, DEFAULT_VARIANT,
};
use std::path::PathBuf;
use tracing::debug;

/// A registered user
#[derive(Debug, Clone)]
pub struct UserHandle<'a> {
    client: &'a Client,
    name: String,
}

impl<'a> UserHandle<'a> {
    pub(crate) fn new(client: &'a Client, name: String) -> Self {
        Self { client, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Make this user the owner of resources registered without one
    pub fn make_default_owner(self) -> Result<Self> {
        self.client.set_default_owner(&self.name)?;
        Ok(self)
    }
}

/// A registered entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityHandle {
    name: String,
}

impl EntityHandle {
    pub(crate) fn new(name: String) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The local provider
#[derive(Debug, Clone)]
pub struct LocalProvider<'a> {
    client: &'a Client,
}

impl<'a> LocalProvider<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn name(&self) -> &'static str {
        Provider::LOCAL_NAME
    }

    /// Register a CSV file as a source
    pub fn register_file(&self, file: FileSource) -> Result<SourceHandle<'a>> {
        let source = Source {
            name: file.name,
            variant: file.variant,
            description: file.description,
            owner: file.owner,
            provider: self.name().to_string(),
            definition: SourceDefinition::PrimaryFile { path: file.path },
        };
        let name_variant = source.name_variant();
        self.client.register(source)?;
        Ok(SourceHandle::new(self.client, name_variant))
    }

    /// Register a dataframe transformation as a source
    pub fn df_transformation(&self, transformation: TransformationSource) -> Result<SourceHandle<'a>> {
        let source = Source {
            name: transformation.name,
            variant: transformation.variant,
            description: transformation.description,
            owner: transformation.owner,
            provider: self.name().to_string(),
            definition: SourceDefinition::Transformation(transformation.transformation),
        };
        let name_variant = source.name_variant();
        self.client.register(source)?;
        Ok(SourceHandle::new(self.client, name_variant))
    }
}

/// A registered file source or transformation
#[derive(Debug, Clone)]
pub struct SourceHandle<'a> {
    client: &'a Client,
    name_variant: NameVariant,
}

impl<'a> SourceHandle<'a> {
    pub(crate) fn new(client: &'a Client, name_variant: NameVariant) -> Self {
        Self {
            client,
            name_variant,
        }
    }

    pub fn name_variant(&self) -> &NameVariant {
        &self.name_variant
    }

    /// Register features and labels read from this source
    pub fn register_resources(&self, registration: ResourceRegistration) -> Result<Vec<ResourceId>> {
        let ResourceRegistration {
            entity,
            entity_column,
            inference_store,
            owner,
            features,
            labels,
        } = registration;

        let columns = |value: String| ResourceColumns {
            entity: entity_column.clone(),
            value,
        };

        let mut ids = Vec::with_capacity(features.len() + labels.len());
        for feature in features {
            ids.push(self.client.register(Feature {
                name: feature.name,
                variant: feature.variant,
                description: feature.description,
                owner: owner.clone(),
                source: self.name_variant.clone(),
                entity: entity.clone(),
                columns: columns(feature.column),
                value_type: feature.value_type,
                inference_store: inference_store.clone(),
            })?);
        }
        for label in labels {
            ids.push(self.client.register(Label {
                name: label.name,
                variant: label.variant,
                description: label.description,
                owner: owner.clone(),
                source: self.name_variant.clone(),
                entity: entity.clone(),
                columns: columns(label.column),
                value_type: label.value_type,
            })?);
        }

        debug!(source = %self.name_variant, count = ids.len(), "Registered source resources");
        Ok(ids)
    }
}

/// Arguments for [`LocalProvider::register_file`]
#[derive(Debug, Clone, PartialEq)]
pub struct FileSource {
    name: String,
    variant: String,
    description: String,
    owner: Option<String>,
    path: PathBuf,
}

impl FileSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            variant: DEFAULT_VARIANT.to_string(),
            description: String::new(),
            owner: None,
            path: path.into(),
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

/// Arguments for [`LocalProvider::df_transformation`]
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationSource {
    name: String,
    variant: String,
    description: String,
    owner: Option<String>,
    transformation: DataFrameTransformation,
}

impl TransformationSource {
    pub fn new(name: impl Into<String>, transformation: DataFrameTransformation) -> Self {
        Self {
            name: name.into(),
            variant: DEFAULT_VARIANT.to_string(),
            description: String::new(),
            owner: None,
            transformation,
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

/// One column of a source registered as a feature or label
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnResource {
    name: String,
    variant: String,
    description: String,
    column: String,
    value_type: ValueType,
}

/// A feature column for [`ResourceRegistration`]
pub type FeatureColumn = ColumnResource;

/// A label column for [`ResourceRegistration`]
pub type LabelColumn = ColumnResource;

impl ColumnResource {
    pub fn new(name: impl Into<String>, column: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            variant: DEFAULT_VARIANT.to_string(),
            description: String::new(),
            column: column.into(),
            value_type,
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Arguments for [`SourceHandle::register_resources`]
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRegistration {
    entity: String,
    entity_column: String,
    inference_store: Option<String>,
    owner: Option<String>,
    features: Vec<FeatureColumn>,
    labels: Vec<LabelColumn>,
}

impl ResourceRegistration {
    pub fn new(entity: &EntityHandle, entity_column: impl Into<String>) -> Self {
        Self {
            entity: entity.name().to_string(),
            entity_column: entity_column.into(),
            inference_store: None,
            owner: None,
            features: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Serve the features from this provider
    pub fn with_inference_store(mut self, provider: &LocalProvider<'_>) -> Self {
        self.inference_store = Some(provider.name().to_string());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn feature(mut self, feature: FeatureColumn) -> Self {
        self.features.push(feature);
        self
    }

    pub fn label(mut self, label: LabelColumn) -> Self {
        self.labels.push(label);
        self
    }
}

/// Arguments for [`Client::register_training_set`]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSetRegistration {
    name: String,
    variant: String,
    description: String,
    owner: Option<String>,
    label: NameVariant,
    features: Vec<NameVariant>,
}

impl TrainingSetRegistration {
    pub fn new(name: impl Into<String>, label: impl Into<NameVariant>) -> Self {
        Self {
            name: name.into(),
            variant: DEFAULT_VARIANT.to_string(),
            description: String::new(),
            owner: None,
            label: label.into(),
            features: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn feature(mut self, feature: impl Into<NameVariant>) -> Self {
        self.features.push(feature.into());
        self
    }

    pub(crate) fn into_training_set(self) -> TrainingSet {
        TrainingSet {
            name: self.name,
            variant: self.variant,
            description: self.description,
            owner: self.owner,
            label: self.label,
            features: self.features,
        }
    }
}
