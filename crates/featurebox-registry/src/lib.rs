//! Resource registry for featurebox
//!
//! Resources are registered into a pending batch and committed together by
//! [`ResourceRegistry::apply`]. Applying validates the whole batch first:
//!
//! - **Redefinition**: the same `(kind, name, variant)` with a different
//!   definition fingerprint is rejected with
//!   [`RegistryError::ResourceRedefined`]. Identical re-registrations are
//!   accepted and create no duplicate entry.
//! - **Definition shape**: empty names, transformations without a single
//!   input, training sets without features.
//! - **Dependencies**: every referenced resource must already be committed
//!   or be part of the same batch.
//!
//! Nothing is committed unless every check passes.
//!
//! # Quick Start
//!
//! ```
//! use featurebox_core::{Entity, User};
//! use featurebox_registry::ResourceRegistry;
//!
//! let mut registry = ResourceRegistry::new();
//! registry.register(User::new("featureformer"));
//! registry.register(Entity::new("user"));
//! registry.register(Entity::new("user"));
//!
//! let report = registry.apply().unwrap();
//! assert_eq!(report.created.len(), 2);
//! assert_eq!(registry.len(), 2);
//! ```

pub mod error;
pub mod manifest;
pub mod registry;
mod validation;

pub use error::{RegistryError, RegistryResult};
pub use manifest::{Manifest, UserEntry};
pub use registry::{ApplyReport, ResourceRegistry};
