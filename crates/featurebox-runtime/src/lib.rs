//! featurebox runtime - local materialization engine
//!
//! This crate provides:
//! - CSV file sources loaded into in-memory tables
//! - Execution of dataframe transformations (select, rename, filter, aggregate)
//! - A cached [`LocalStore`] serving per-entity feature values
//! - Training set materialization into replayable [`Dataset`]s with
//!   `repeat`, `shuffle` and `batch`

pub mod dataset;
pub mod error;
pub mod materializer;
pub mod source;
pub mod store;
pub mod table;
pub mod transform;

// Re-export main types
pub use dataset::{Batch, BatchIter, BatchedDataset, Dataset, DatasetIter, TrainingRow};
pub use error::{Result, RuntimeError};
pub use materializer::Materializer;
pub use source::CsvReader;
pub use store::{CacheStats, LocalStore};
pub use table::Table;
