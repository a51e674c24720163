//! Batch validation run by `apply`
//!
//! Checks run after redefinition detection, in this order:
//! 1. per-definition shape checks
//! 2. every dependency exists, committed or in the same batch
//! 3. cross-resource consistency (training set entities)

use crate::error::{RegistryError, RegistryResult};
use featurebox_core::{Catalog, Resource, ResourceId, SourceDefinition};
use std::collections::{HashMap, HashSet};

/// Committed resources overlaid with the batch being applied
pub(crate) struct BatchView<'a> {
    pub(crate) committed: &'a HashMap<ResourceId, Resource>,
    pub(crate) staged: &'a HashMap<ResourceId, &'a Resource>,
}

impl Catalog for BatchView<'_> {
    fn resource(&self, id: &ResourceId) -> Option<&Resource> {
        self.staged
            .get(id)
            .copied()
            .or_else(|| self.committed.get(id))
    }
}

fn invalid(id: &ResourceId, reason: impl Into<String>) -> RegistryError {
    RegistryError::InvalidDefinition {
        id: id.clone(),
        reason: reason.into(),
    }
}

pub(crate) fn check_definition(resource: &Resource) -> RegistryResult<()> {
    let id = resource.id();
    if id.name.trim().is_empty() {
        return Err(invalid(&id, "name must not be empty"));
    }
    if matches!(&id.variant, Some(v) if v.trim().is_empty()) {
        return Err(invalid(&id, "variant must not be empty"));
    }

    match resource {
        Resource::User(_) | Resource::Provider(_) | Resource::Entity(_) => {}
        Resource::Source(source) => match &source.definition {
            SourceDefinition::PrimaryFile { path } => {
                if path.as_os_str().is_empty() {
                    return Err(invalid(&id, "file path must not be empty"));
                }
            }
            SourceDefinition::Transformation(t) => {
                if t.inputs.len() != 1 {
                    return Err(invalid(
                        &id,
                        format!(
                            "dataframe transformations take exactly one input, got {}",
                            t.inputs.len()
                        ),
                    ));
                }
                if t.steps.is_empty() {
                    return Err(invalid(&id, "transformation has no steps"));
                }
            }
        },
        Resource::Feature(f) => {
            if f.columns.entity.is_empty() || f.columns.value.is_empty() {
                return Err(invalid(&id, "entity and value columns are required"));
            }
        }
        Resource::Label(l) => {
            if l.columns.entity.is_empty() || l.columns.value.is_empty() {
                return Err(invalid(&id, "entity and value columns are required"));
            }
        }
        Resource::TrainingSet(t) => {
            if t.features.is_empty() {
                return Err(invalid(&id, "training set needs at least one feature"));
            }
            let mut seen = HashSet::new();
            for feature in &t.features {
                if !seen.insert(feature) {
                    return Err(invalid(&id, format!("feature {} listed twice", feature)));
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn check_dependencies(resource: &Resource, view: &BatchView<'_>) -> RegistryResult<()> {
    for dependency in resource.dependencies() {
        if view.resource(&dependency).is_none() {
            return Err(RegistryError::MissingDependency {
                resource: resource.id(),
                dependency,
            });
        }
    }
    Ok(())
}

/// Every feature of a training set must be keyed by the label's entity
pub(crate) fn check_references(resource: &Resource, view: &BatchView<'_>) -> RegistryResult<()> {
    let Resource::TrainingSet(ts) = resource else {
        return Ok(());
    };
    let id = resource.id();
    let label = view
        .label(&ts.label)
        .ok_or_else(|| RegistryError::NotFound(ResourceId::label(&ts.label)))?;

    for nv in &ts.features {
        let feature = view
            .feature(nv)
            .ok_or_else(|| RegistryError::NotFound(ResourceId::feature(nv)))?;
        if feature.entity != label.entity {
            return Err(invalid(
                &id,
                format!(
                    "feature {} uses entity {} but label {} uses entity {}",
                    nv, feature.entity, ts.label, label.entity
                ),
            ));
        }
    }
    Ok(())
}
