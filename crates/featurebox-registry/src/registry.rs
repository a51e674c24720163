//! In-memory resource registry
//!
//! Resources are first registered into a pending batch and only become
//! visible once [`ResourceRegistry::apply`] validates and commits the whole
//! batch. A failed apply commits nothing.

use crate::error::{RegistryError, RegistryResult};
use crate::manifest::Manifest;
use crate::validation::{check_definition, check_dependencies, check_references, BatchView};
use featurebox_core::{Catalog, Resource, ResourceId};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Outcome of a successful apply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Resources committed by this apply, in registration order
    pub created: Vec<ResourceId>,

    /// Resources already committed with an identical definition
    pub unchanged: Vec<ResourceId>,
}

impl ApplyReport {
    /// True if the apply committed nothing new
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
    }
}

/// Registry of committed resources plus the pending batch
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    /// Committed resources indexed by identity
    committed: HashMap<ResourceId, Resource>,

    /// Commit order
    order: Vec<ResourceId>,

    /// Registered but not yet applied
    pending: Vec<Resource>,

    /// Owner given to ownable resources registered without one
    default_owner: Option<String>,
}

impl ResourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_default_owner(&mut self, owner: impl Into<String>) {
        let owner = owner.into();
        debug!("Default owner set to {}", owner);
        self.default_owner = Some(owner);
    }

    pub fn default_owner(&self) -> Option<&str> {
        self.default_owner.as_deref()
    }

    /// Add a resource to the pending batch.
    ///
    /// Registering the same definition twice before an apply keeps a single
    /// pending entry. Conflicts are not reported here but by `apply`.
    pub fn register(&mut self, resource: impl Into<Resource>) -> ResourceId {
        let resource = resource
            .into()
            .with_default_owner(self.default_owner.as_deref());
        let id = resource.id();

        if self.pending.iter().any(|p| *p == resource) {
            debug!("Skipping duplicate registration of {}", id);
            return id;
        }

        debug!("Registered {}", id);
        self.pending.push(resource);
        id
    }

    /// Register every resource declared in a manifest.
    ///
    /// A manifest's default owner only applies to that manifest's resources.
    pub fn register_manifest(&mut self, manifest: Manifest) -> Vec<ResourceId> {
        manifest
            .into_resources()
            .into_iter()
            .map(|resource| self.register(resource))
            .collect()
    }

    /// Drop the pending batch without applying it
    pub fn discard_pending(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of committed resources
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn get(&self, id: &ResourceId) -> Option<&Resource> {
        self.committed.get(id)
    }

    /// Committed resource or `NotFound`
    pub fn require(&self, id: &ResourceId) -> RegistryResult<&Resource> {
        self.committed
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    /// Committed resources in commit order
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.order.iter().filter_map(|id| self.committed.get(id))
    }

    /// Validate and commit the pending batch.
    ///
    /// The batch is consumed whether or not it is accepted. On error the
    /// committed state is left exactly as it was.
    pub fn apply(&mut self) -> RegistryResult<ApplyReport> {
        let batch = std::mem::take(&mut self.pending);
        debug!("Applying {} pending resources", batch.len());

        let mut report = ApplyReport::default();
        let mut staged: Vec<Resource> = Vec::new();
        let mut staged_index: HashMap<ResourceId, usize> = HashMap::new();

        for resource in batch {
            let id = resource.id();

            let existing = match staged_index.get(&id) {
                Some(&idx) => Some(&staged[idx]),
                None => self.committed.get(&id),
            };

            if let Some(existing) = existing {
                let before = existing.fingerprint()?;
                let after = resource.fingerprint()?;
                if before != after {
                    let changed = before.diff(&after);
                    warn!("Rejecting batch: {} redefined ({})", id, changed.join(", "));
                    return Err(RegistryError::ResourceRedefined { id, changed });
                }
                if !staged_index.contains_key(&id) && !report.unchanged.contains(&id) {
                    report.unchanged.push(id);
                }
                continue;
            }

            staged_index.insert(id, staged.len());
            staged.push(resource);
        }

        for resource in &staged {
            check_definition(resource)?;
        }

        let staged_map: HashMap<ResourceId, &Resource> =
            staged.iter().map(|r| (r.id(), r)).collect();
        let view = BatchView {
            committed: &self.committed,
            staged: &staged_map,
        };
        for resource in &staged {
            check_dependencies(resource, &view)?;
        }
        for resource in &staged {
            check_references(resource, &view)?;
        }

        for resource in staged {
            let id = resource.id();
            self.order.push(id.clone());
            self.committed.insert(id.clone(), resource);
            report.created.push(id);
        }

        info!(
            "Applied {} new resources ({} unchanged, {} total)",
            report.created.len(),
            report.unchanged.len(),
            self.committed.len()
        );
        Ok(report)
    }
}

impl Catalog for ResourceRegistry {
    fn resource(&self, id: &ResourceId) -> Option<&Resource> {
        self.committed.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use featurebox_core::{Entity, Provider, User};

    #[test]
    fn test_register_dedupes_pending() {
        let mut registry = ResourceRegistry::new();
        registry.register(User::new("featureformer"));
        registry.register(User::new("featureformer"));
        registry.register(Provider::local());
        registry.register(Provider::local());

        assert_eq!(registry.pending_len(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_apply_commits_in_order() {
        let mut registry = ResourceRegistry::new();
        registry.register(User::new("featureformer"));
        registry.register(Entity::new("user"));

        let report = registry.apply().unwrap();
        assert_eq!(
            report.created,
            vec![ResourceId::user("featureformer"), ResourceId::entity("user")]
        );
        assert!(report.unchanged.is_empty());
        assert_eq!(registry.pending_len(), 0);

        let kinds: Vec<_> = registry.resources().map(|r| r.kind()).collect();
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_reapply_identical_is_noop() {
        let mut registry = ResourceRegistry::new();
        registry.register(Entity::new("user"));
        registry.apply().unwrap();

        registry.register(Entity::new("user"));
        let report = registry.apply().unwrap();
        assert!(report.is_noop());
        assert_eq!(report.unchanged, vec![ResourceId::entity("user")]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_discard_pending() {
        let mut registry = ResourceRegistry::new();
        registry.register(Entity::new("user"));
        assert_eq!(registry.discard_pending(), 1);
        assert!(registry.apply().unwrap().is_noop());
    }
}
