//! Resource model
//!
//! A resource is identified by `(kind, name, variant)`. Users, providers and
//! entities are not versioned and carry no variant. Transformations are
//! sources and share the source namespace.

pub mod definition;
pub mod transformation;

pub use definition::{
    Entity, Feature, Label, Provider, ProviderType, ResourceColumns, Source, SourceDefinition,
    TrainingSet, User,
};
pub use transformation::{AggregateFunction, DataFrameTransformation, FilterOperator, TransformStep};

use crate::fingerprint::Fingerprint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variant used when none is given
pub const DEFAULT_VARIANT: &str = "default";

/// Name and variant of a versioned resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NameVariant {
    pub name: String,

    #[serde(default = "default_variant")]
    pub variant: String,
}

fn default_variant() -> String {
    DEFAULT_VARIANT.to_string()
}

impl NameVariant {
    pub fn new(name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variant: variant.into(),
        }
    }

    /// Name with the default variant
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_VARIANT)
    }
}

impl fmt::Display for NameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.variant)
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for NameVariant {
    fn from((name, variant): (N, V)) -> Self {
        Self::new(name, variant)
    }
}

/// Resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    User,
    Provider,
    Entity,
    Source,
    Feature,
    Label,
    TrainingSet,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::User => "user",
            ResourceKind::Provider => "provider",
            ResourceKind::Entity => "entity",
            ResourceKind::Source => "source",
            ResourceKind::Feature => "feature",
            ResourceKind::Label => "label",
            ResourceKind::TrainingSet => "training_set",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId {
    pub kind: ResourceKind,
    pub name: String,
    pub variant: Option<String>,
}

impl ResourceId {
    pub fn unversioned(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            variant: None,
        }
    }

    pub fn versioned(kind: ResourceKind, name_variant: &NameVariant) -> Self {
        Self {
            kind,
            name: name_variant.name.clone(),
            variant: Some(name_variant.variant.clone()),
        }
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self::unversioned(ResourceKind::User, name)
    }

    pub fn provider(name: impl Into<String>) -> Self {
        Self::unversioned(ResourceKind::Provider, name)
    }

    pub fn entity(name: impl Into<String>) -> Self {
        Self::unversioned(ResourceKind::Entity, name)
    }

    pub fn source(name_variant: &NameVariant) -> Self {
        Self::versioned(ResourceKind::Source, name_variant)
    }

    pub fn feature(name_variant: &NameVariant) -> Self {
        Self::versioned(ResourceKind::Feature, name_variant)
    }

    pub fn label(name_variant: &NameVariant) -> Self {
        Self::versioned(ResourceKind::Label, name_variant)
    }

    pub fn training_set(name_variant: &NameVariant) -> Self {
        Self::versioned(ResourceKind::TrainingSet, name_variant)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant {
            Some(variant) => write!(f, "{} {} ({})", self.kind, self.name, variant),
            None => write!(f, "{} {}", self.kind, self.name),
        }
    }
}

/// Any registrable resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resource {
    User(User),
    Provider(Provider),
    Entity(Entity),
    Source(Source),
    Feature(Feature),
    Label(Label),
    TrainingSet(TrainingSet),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::User(_) => ResourceKind::User,
            Resource::Provider(_) => ResourceKind::Provider,
            Resource::Entity(_) => ResourceKind::Entity,
            Resource::Source(_) => ResourceKind::Source,
            Resource::Feature(_) => ResourceKind::Feature,
            Resource::Label(_) => ResourceKind::Label,
            Resource::TrainingSet(_) => ResourceKind::TrainingSet,
        }
    }

    pub fn id(&self) -> ResourceId {
        match self {
            Resource::User(u) => ResourceId::user(&u.name),
            Resource::Provider(p) => ResourceId::provider(&p.name),
            Resource::Entity(e) => ResourceId::entity(&e.name),
            Resource::Source(s) => ResourceId::source(&s.name_variant()),
            Resource::Feature(f) => ResourceId::feature(&f.name_variant()),
            Resource::Label(l) => ResourceId::label(&l.name_variant()),
            Resource::TrainingSet(t) => ResourceId::training_set(&t.name_variant()),
        }
    }

    pub fn owner(&self) -> Option<&str> {
        match self {
            Resource::Source(s) => s.owner.as_deref(),
            Resource::Feature(f) => f.owner.as_deref(),
            Resource::Label(l) => l.owner.as_deref(),
            Resource::TrainingSet(t) => t.owner.as_deref(),
            Resource::User(_) | Resource::Provider(_) | Resource::Entity(_) => None,
        }
    }

    /// Fill in the owner if the resource is ownable and has none
    pub fn with_default_owner(mut self, owner: Option<&str>) -> Self {
        let Some(owner) = owner else {
            return self;
        };
        let slot = match &mut self {
            Resource::Source(s) => Some(&mut s.owner),
            Resource::Feature(f) => Some(&mut f.owner),
            Resource::Label(l) => Some(&mut l.owner),
            Resource::TrainingSet(t) => Some(&mut t.owner),
            Resource::User(_) | Resource::Provider(_) | Resource::Entity(_) => None,
        };
        if let Some(slot) = slot {
            if slot.is_none() {
                *slot = Some(owner.to_string());
            }
        }
        self
    }

    /// Resources that must exist before this one can be committed
    pub fn dependencies(&self) -> Vec<ResourceId> {
        let mut deps = Vec::new();
        if let Some(owner) = self.owner() {
            deps.push(ResourceId::user(owner));
        }
        match self {
            Resource::User(_) | Resource::Provider(_) | Resource::Entity(_) => {}
            Resource::Source(s) => {
                deps.push(ResourceId::provider(&s.provider));
                if let SourceDefinition::Transformation(t) = &s.definition {
                    deps.extend(t.inputs.iter().map(ResourceId::source));
                }
            }
            Resource::Feature(f) => {
                deps.push(ResourceId::source(&f.source));
                deps.push(ResourceId::entity(&f.entity));
                if let Some(store) = &f.inference_store {
                    deps.push(ResourceId::provider(store));
                }
            }
            Resource::Label(l) => {
                deps.push(ResourceId::source(&l.source));
                deps.push(ResourceId::entity(&l.entity));
            }
            Resource::TrainingSet(t) => {
                deps.push(ResourceId::label(&t.label));
                deps.extend(t.features.iter().map(ResourceId::feature));
            }
        }
        deps
    }

    pub fn fingerprint(&self) -> crate::error::Result<Fingerprint> {
        Fingerprint::of(self)
    }
}

macro_rules! impl_from_definition {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Resource {
                fn from(def: $variant) -> Self {
                    Resource::$variant(def)
                }
            }
        )*
    };
}

impl_from_definition!(User, Provider, Entity, Source, Feature, Label, TrainingSet);
