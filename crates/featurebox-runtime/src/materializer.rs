//! Training set materialization
//!
//! Label rows drive the result: every label row yields one training row, in
//! label-source order, with each feature looked up by the row's entity key.
//! A feature with no value for the key contributes null.

use crate::dataset::{Dataset, TrainingRow};
use crate::error::{Result, RuntimeError};
use crate::store::LocalStore;
use featurebox_core::{Catalog, NameVariant, ResourceId, Value};
use std::collections::HashMap;
use tracing::{debug, info};

/// Joins features onto labels for committed training sets
pub struct Materializer<'a> {
    store: &'a LocalStore,
    catalog: &'a dyn Catalog,
}

impl<'a> Materializer<'a> {
    pub fn new(store: &'a LocalStore, catalog: &'a dyn Catalog) -> Self {
        Self { store, catalog }
    }

    /// Materialize a training set into a dataset
    pub fn training_set(&self, name: &NameVariant) -> Result<Dataset> {
        let training_set = self
            .catalog
            .training_set(name)
            .ok_or_else(|| RuntimeError::ResourceNotFound(ResourceId::training_set(name)))?;

        let label = self
            .catalog
            .label(&training_set.label)
            .ok_or_else(|| RuntimeError::ResourceNotFound(ResourceId::label(&training_set.label)))?;

        let feature_tables = training_set
            .features
            .iter()
            .map(|feature_name| {
                let feature = self.catalog.feature(feature_name).ok_or_else(|| {
                    RuntimeError::ResourceNotFound(ResourceId::feature(feature_name))
                })?;
                self.store.feature_values(self.catalog, feature)
            })
            .collect::<Result<Vec<HashMap<String, Value>>>>()?;

        let rows: Vec<TrainingRow> = self
            .store
            .label_rows(self.catalog, label)?
            .into_iter()
            .map(|(key, label_value)| {
                let features = feature_tables
                    .iter()
                    .map(|values| {
                        key.as_ref()
                            .and_then(|k| values.get(k))
                            .cloned()
                            .unwrap_or(Value::Null)
                    })
                    .collect();
                TrainingRow::new(features, label_value)
            })
            .collect();

        let missing = rows
            .iter()
            .filter(|row| row.features().iter().any(Value::is_null))
            .count();
        if missing > 0 {
            debug!(training_set = %name, rows = missing, "Rows with missing feature values");
        }
        info!(
            training_set = %name,
            rows = rows.len(),
            features = training_set.features.len(),
            "Materialized training set"
        );

        Ok(Dataset::from_rows(rows))
    }
}
