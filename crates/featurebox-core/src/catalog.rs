//! Read access to committed resources
//!
//! The registry implements [`Catalog`]; the runtime only depends on this
//! trait, never on the registry itself.

use crate::resource::{Entity, Feature, Label, NameVariant, Resource, ResourceId, Source, TrainingSet};

/// Lookup of committed resources by identity
pub trait Catalog {
    /// Get any resource by id
    fn resource(&self, id: &ResourceId) -> Option<&Resource>;

    fn entity(&self, name: &str) -> Option<&Entity> {
        match self.resource(&ResourceId::entity(name)) {
            Some(Resource::Entity(e)) => Some(e),
            _ => None,
        }
    }

    fn source(&self, name_variant: &NameVariant) -> Option<&Source> {
        match self.resource(&ResourceId::source(name_variant)) {
            Some(Resource::Source(s)) => Some(s),
            _ => None,
        }
    }

    fn feature(&self, name_variant: &NameVariant) -> Option<&Feature> {
        match self.resource(&ResourceId::feature(name_variant)) {
            Some(Resource::Feature(f)) => Some(f),
            _ => None,
        }
    }

    fn label(&self, name_variant: &NameVariant) -> Option<&Label> {
        match self.resource(&ResourceId::label(name_variant)) {
            Some(Resource::Label(l)) => Some(l),
            _ => None,
        }
    }

    fn training_set(&self, name_variant: &NameVariant) -> Option<&TrainingSet> {
        match self.resource(&ResourceId::training_set(name_variant)) {
            Some(Resource::TrainingSet(t)) => Some(t),
            _ => None,
        }
    }
}

impl Catalog for std::collections::HashMap<ResourceId, Resource> {
    fn resource(&self, id: &ResourceId) -> Option<&Resource> {
        self.get(id)
    }
}
