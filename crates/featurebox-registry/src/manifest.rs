//! YAML resource manifests
//!
//! A manifest declares a batch of resources in one document:
//!
//! ```yaml
//! users:
//!   - name: featureformer
//!     default_owner: true
//! providers:
//!   - name: local-mode
//!     provider_type: local
//! entities:
//!   - name: user
//! sources:
//!   - name: transactions
//!     variant: quickstart
//!     definition:
//!       type: primary_file
//!       path: transactions.csv
//! features:
//!   - name: avg_transactions
//!     variant: quickstart
//!     source: { name: average_user_transaction, variant: quickstart }
//!     entity: user
//!     columns: { entity: CustomerID, value: TransactionAmount }
//!     type: float32
//! ```
//!
//! Resources are registered in dependency order: users, providers,
//! entities, sources, features, labels, training sets.

use crate::error::RegistryResult;
use featurebox_core::{Entity, Feature, Label, Provider, Resource, Source, TrainingSet, User};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// User entry in a manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEntry {
    pub name: String,

    /// Make this user the default owner of the other resources
    #[serde(default)]
    pub default_owner: bool,
}

/// A batch of resource declarations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub users: Vec<UserEntry>,

    #[serde(default)]
    pub providers: Vec<Provider>,

    #[serde(default)]
    pub entities: Vec<Entity>,

    #[serde(default)]
    pub sources: Vec<Source>,

    #[serde(default)]
    pub features: Vec<Feature>,

    #[serde(default)]
    pub labels: Vec<Label>,

    #[serde(default)]
    pub training_sets: Vec<TrainingSet>,
}

impl Manifest {
    pub fn from_yaml_str(content: &str) -> RegistryResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        debug!("Loading manifest from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// The last user flagged as default owner
    pub fn default_owner(&self) -> Option<&str> {
        self.users
            .iter()
            .rev()
            .find(|u| u.default_owner)
            .map(|u| u.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.users.len()
            + self.providers.len()
            + self.entities.len()
            + self.sources.len()
            + self.features.len()
            + self.labels.len()
            + self.training_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into resources in dependency order, with unowned resources
    /// given the manifest's default owner
    pub fn into_resources(self) -> Vec<Resource> {
        let owner = self.default_owner().map(str::to_string);
        let mut resources = Vec::with_capacity(self.len());
        resources.extend(self.users.into_iter().map(|u| Resource::from(User::new(u.name))));
        resources.extend(self.providers.into_iter().map(Resource::from));
        resources.extend(self.entities.into_iter().map(Resource::from));
        resources.extend(self.sources.into_iter().map(Resource::from));
        resources.extend(self.features.into_iter().map(Resource::from));
        resources.extend(self.labels.into_iter().map(Resource::from));
        resources.extend(self.training_sets.into_iter().map(Resource::from));
        resources
            .into_iter()
            .map(|r| r.with_default_owner(owner.as_deref()))
            .collect()
    }
}
