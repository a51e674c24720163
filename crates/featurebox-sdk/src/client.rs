//! featurebox client
//!
//! A [`Client`] owns a resource registry and a local store. Registration
//! calls stage resources; [`Client::apply`] commits them; training sets and
//! feature values are then read from the committed state.

use crate::builder::ClientBuilder;
use crate::config::ClientConfig;
use crate::error::{Result, SdkError};
use crate::handles::{EntityHandle, LocalProvider, TrainingSetRegistration, UserHandle};
use featurebox_core::{Entity, NameVariant, Provider, Resource, ResourceId, User, Value};
use featurebox_registry::{ApplyReport, Manifest, ResourceRegistry};
use featurebox_runtime::{CacheStats, Dataset, LocalStore, Materializer};
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

/// featurebox client for local mode
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    registry: RwLock<ResourceRegistry>,
    store: LocalStore,
}

impl Client {
    /// Create a client with the default configuration
    pub fn new() -> Self {
        Self::from_config(ClientConfig::default())
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let mut store = LocalStore::new().with_cache(config.cache_sources);
        if let Some(dir) = &config.data_dir {
            store = store.with_data_dir(dir);
        }

        let mut registry = ResourceRegistry::new();
        if let Some(owner) = &config.default_owner {
            registry.set_default_owner(owner.as_str());
        }

        Self {
            config,
            registry: RwLock::new(registry),
            store,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ========== Registration ==========

    pub fn register_user(&self, name: impl Into<String>) -> Result<UserHandle<'_>> {
        let name = name.into();
        self.register(User::new(name.as_str()))?;
        Ok(UserHandle::new(self, name))
    }

    /// Register the local provider. Calling this more than once is harmless.
    pub fn register_local(&self) -> Result<LocalProvider<'_>> {
        self.register(Provider::local())?;
        Ok(LocalProvider::new(self))
    }

    pub fn register_entity(&self, name: impl Into<String>) -> Result<EntityHandle> {
        let name = name.into();
        self.register(Entity::new(name.as_str()))?;
        Ok(EntityHandle::new(name))
    }

    pub fn register_training_set(&self, registration: TrainingSetRegistration) -> Result<ResourceId> {
        self.register(registration.into_training_set())
    }

    /// Register every resource of a YAML manifest
    pub fn register_manifest_str(&self, yaml: &str) -> Result<Vec<ResourceId>> {
        let manifest = Manifest::from_yaml_str(yaml)?;
        Ok(self.registry_mut()?.register_manifest(manifest))
    }

    pub fn register_manifest_file(&self, path: impl AsRef<Path>) -> Result<Vec<ResourceId>> {
        let manifest = Manifest::from_file(path)?;
        Ok(self.registry_mut()?.register_manifest(manifest))
    }

    /// Commit every pending registration
    pub fn apply(&self) -> Result<ApplyReport> {
        let report = self.registry_mut()?.apply().map_err(|e| {
            warn!("Apply failed: {}", e);
            e
        })?;
        info!(
            created = report.created.len(),
            unchanged = report.unchanged.len(),
            "Applied resources"
        );
        Ok(report)
    }

    pub(crate) fn register(&self, resource: impl Into<Resource>) -> Result<ResourceId> {
        Ok(self.registry_mut()?.register(resource))
    }

    pub(crate) fn set_default_owner(&self, owner: &str) -> Result<()> {
        self.registry_mut()?.set_default_owner(owner);
        Ok(())
    }

    // ========== Reading ==========

    /// Materialize a committed training set
    pub fn training_set(&self, name: &str, variant: &str) -> Result<Dataset> {
        let registry = self.registry()?;
        let dataset = Materializer::new(&self.store, &*registry)
            .training_set(&NameVariant::new(name, variant))?;
        Ok(dataset)
    }

    /// Serve feature values for one entity.
    ///
    /// `entity` is `(entity name or entity column, key)`; values come back in
    /// the order of `features`.
    pub fn features(&self, features: &[(&str, &str)], entity: (&str, &str)) -> Result<Vec<Value>> {
        let names: Vec<NameVariant> = features.iter().map(|&nv| nv.into()).collect();
        let registry = self.registry()?;
        let values = self
            .store
            .serve_features(&*registry, &names, entity.0, entity.1)?;
        Ok(values)
    }

    /// A committed resource
    pub fn resource(&self, id: &ResourceId) -> Result<Option<Resource>> {
        Ok(self.registry()?.get(id).cloned())
    }

    /// Number of committed resources
    pub fn len(&self) -> Result<usize> {
        Ok(self.registry()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.registry()?.is_empty())
    }

    pub fn pending_len(&self) -> Result<usize> {
        Ok(self.registry()?.pending_len())
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.store.stats()
    }

    pub fn clear_cache(&self) {
        self.store.clear_cache();
    }

    fn registry(&self) -> Result<RwLockReadGuard<'_, ResourceRegistry>> {
        self.registry
            .read()
            .map_err(|_| SdkError::LockPoisoned("registry"))
    }

    fn registry_mut(&self) -> Result<RwLockWriteGuard<'_, ResourceRegistry>> {
        self.registry
            .write()
            .map_err(|_| SdkError::LockPoisoned("registry"))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
