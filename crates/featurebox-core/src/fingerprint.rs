//! Structural fingerprints of resource definitions
//!
//! A fingerprint is the canonical JSON form of a definition. Object keys are
//! kept sorted, so two definitions with the same attributes always produce
//! the same fingerprint regardless of how they were built.

use crate::error::{CoreError, Result};
use serde::Serialize;
use serde_json::Value as Json;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// Canonical form of a definition's attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Fingerprint(Json);

impl Fingerprint {
    pub fn of<T: Serialize>(definition: &T) -> Result<Self> {
        serde_json::to_value(definition)
            .map(Fingerprint)
            .map_err(|e| CoreError::Fingerprint(e.to_string()))
    }

    pub fn as_json(&self) -> &Json {
        &self.0
    }

    /// Short stable digest, for log lines
    pub fn digest(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.0.to_string().hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }

    /// Dotted paths of the attributes that differ between two fingerprints.
    ///
    /// Nested objects are walked; arrays and scalars are compared whole.
    pub fn diff(&self, other: &Fingerprint) -> Vec<String> {
        let mut changed = Vec::new();
        diff_values("", &self.0, &other.0, &mut changed);
        changed
    }
}

fn diff_values(path: &str, left: &Json, right: &Json, changed: &mut Vec<String>) {
    match (left, right) {
        (Json::Object(l), Json::Object(r)) => {
            let keys: BTreeSet<&String> = l.keys().chain(r.keys()).collect();
            for key in keys {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                match (l.get(key), r.get(key)) {
                    (Some(a), Some(b)) => diff_values(&child, a, b, changed),
                    _ => changed.push(child),
                }
            }
        }
        (l, r) if l != r => {
            let name = if path.is_empty() { "<root>" } else { path };
            changed.push(name.to_string());
        }
        _ => {}
    }
}
