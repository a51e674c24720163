//! Local store: loads sources, runs transformations and serves feature values
//!
//! Tables are cached per source name-variant once loaded. Registered
//! definitions never change under a given name-variant, so a cached table
//! stays valid for the lifetime of the store.

use crate::error::{Result, RuntimeError};
use crate::source::{resolve_path, CsvReader};
use crate::table::{entity_key, Table};
use crate::transform::run_steps;
use featurebox_core::{
    Catalog, Feature, Label, NameVariant, ResourceColumns, ResourceId, SourceDefinition, Value,
    ValueType,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Source table cache statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Hit rate in percent
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Store for the local provider
#[derive(Debug, Default)]
pub struct LocalStore {
    data_dir: Option<PathBuf>,
    cache_enabled: bool,
    reader: CsvReader,
    tables: RwLock<HashMap<NameVariant, Arc<Table>>>,
    stats: RwLock<CacheStats>,
}

impl LocalStore {
    /// Create a store with source caching enabled
    pub fn new() -> Self {
        Self {
            cache_enabled: true,
            ..Self::default()
        }
    }

    /// Resolve relative file paths against `dir`
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn with_reader(mut self, reader: CsvReader) -> Self {
        self.reader = reader;
        self
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn stats(&self) -> CacheStats {
        *read_lock(&self.stats)
    }

    pub fn clear_cache(&self) {
        write_lock(&self.tables).clear();
        *write_lock(&self.stats) = CacheStats::default();
        info!("Source cache cleared");
    }

    /// Load a source's table, running its transformation if it has one
    pub fn source_table(&self, catalog: &dyn Catalog, source: &NameVariant) -> Result<Arc<Table>> {
        let mut visiting = Vec::new();
        self.load(catalog, source, &mut visiting)
    }

    fn load(
        &self,
        catalog: &dyn Catalog,
        name: &NameVariant,
        visiting: &mut Vec<NameVariant>,
    ) -> Result<Arc<Table>> {
        if self.cache_enabled {
            if let Some(table) = read_lock(&self.tables).get(name).cloned() {
                write_lock(&self.stats).hits += 1;
                return Ok(table);
            }
            write_lock(&self.stats).misses += 1;
        }

        if visiting.contains(name) {
            return Err(RuntimeError::Transformation {
                name: name.clone(),
                reason: "transformation depends on itself".to_string(),
            });
        }

        let source = catalog
            .source(name)
            .ok_or_else(|| RuntimeError::ResourceNotFound(ResourceId::source(name)))?;

        let table = match &source.definition {
            SourceDefinition::PrimaryFile { path } => {
                let path = resolve_path(self.data_dir.as_deref(), path);
                self.reader.read_path(&name.to_string(), &path)?
            }
            SourceDefinition::Transformation(def) => {
                let input = def.inputs.first().ok_or_else(|| RuntimeError::Transformation {
                    name: name.clone(),
                    reason: "no input source".to_string(),
                })?;
                visiting.push(name.clone());
                let input_table = self.load(catalog, input, visiting)?;
                visiting.pop();
                run_steps(name, &input_table, &def.steps)?
            }
        };

        let table = Arc::new(table);
        if self.cache_enabled {
            write_lock(&self.tables).insert(name.clone(), Arc::clone(&table));
        }
        debug!(source = %name, rows = table.len(), "Source materialized");
        Ok(table)
    }

    /// Entity key to value map for a feature. The last row for a key wins.
    pub fn feature_values(
        &self,
        catalog: &dyn Catalog,
        feature: &Feature,
    ) -> Result<HashMap<String, Value>> {
        let table = self.source_table(catalog, &feature.source)?;
        let mut values = HashMap::new();
        for (key, value) in keyed_values(&table, &feature.columns, feature.value_type)? {
            if let Some(key) = key {
                values.insert(key, value);
            }
        }
        Ok(values)
    }

    /// Label rows in source order, as (entity key, label value)
    pub fn label_rows(
        &self,
        catalog: &dyn Catalog,
        label: &Label,
    ) -> Result<Vec<(Option<String>, Value)>> {
        let table = self.source_table(catalog, &label.source)?;
        keyed_values(&table, &label.columns, label.value_type)
    }

    /// Current value of each feature for one entity key.
    ///
    /// `entity` is either the entity name or the feature's entity column.
    pub fn serve_features(
        &self,
        catalog: &dyn Catalog,
        features: &[NameVariant],
        entity: &str,
        key: &str,
    ) -> Result<Vec<Value>> {
        let mut served = Vec::with_capacity(features.len());
        for name in features {
            let feature = catalog
                .feature(name)
                .ok_or_else(|| RuntimeError::ResourceNotFound(ResourceId::feature(name)))?;
            if feature.entity != entity && feature.columns.entity != entity {
                return Err(RuntimeError::EntityMismatch {
                    feature: name.clone(),
                    expected: entity.to_string(),
                    actual: feature.entity.clone(),
                });
            }
            let mut values = self.feature_values(catalog, feature)?;
            let value = values
                .remove(key)
                .ok_or_else(|| RuntimeError::EntityNotFound {
                    entity: entity.to_string(),
                    key: key.to_string(),
                })?;
            served.push(value);
        }
        debug!(entity, key, count = served.len(), "Served features");
        Ok(served)
    }
}

fn keyed_values(
    table: &Table,
    columns: &ResourceColumns,
    value_type: ValueType,
) -> Result<Vec<(Option<String>, Value)>> {
    let key_idx = table.column_index(&columns.entity)?;
    let value_idx = table.column_index(&columns.value)?;
    table
        .rows()
        .iter()
        .map(|row| -> Result<(Option<String>, Value)> {
            let value = row[value_idx].cast(value_type)?;
            Ok((entity_key(&row[key_idx]), value))
        })
        .collect()
}

// Poisoned locks are recovered: entries are whole tables or plain counters.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}
