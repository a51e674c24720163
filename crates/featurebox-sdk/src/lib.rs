//! featurebox SDK
//!
//! High-level API for declaring feature store resources, applying them and
//! reading training sets and feature values in local mode.
//!
//! ```rust,no_run
//! use featurebox_sdk::{
//!     AggregateFunction, Client, DataFrameTransformation, FeatureColumn, FileSource,
//!     LabelColumn, ResourceRegistration, TrainingSetRegistration, TransformationSource,
//!     ValueType,
//! };
//!
//! # fn main() -> featurebox_sdk::Result<()> {
//! let client = Client::builder().with_data_dir("data").build();
//! client.register_user("featureformer")?.make_default_owner()?;
//!
//! let local = client.register_local()?;
//! let transactions = local.register_file(
//!     FileSource::new("transactions", "transactions.csv").with_variant("quickstart"),
//! )?;
//! let user = client.register_entity("user")?;
//!
//! let average = local.df_transformation(
//!     TransformationSource::new(
//!         "average_user_transaction",
//!         DataFrameTransformation::new(transactions.name_variant().clone()).aggregate(
//!             "CustomerID",
//!             "TransactionAmount",
//!             AggregateFunction::Mean,
//!         ),
//!     )
//!     .with_variant("quickstart"),
//! )?;
//! average.register_resources(
//!     ResourceRegistration::new(&user, "CustomerID")
//!         .with_inference_store(&local)
//!         .feature(
//!             FeatureColumn::new("avg_transactions", "TransactionAmount", ValueType::Float32)
//!                 .with_variant("quickstart"),
//!         ),
//! )?;
//! transactions.register_resources(
//!     ResourceRegistration::new(&user, "CustomerID")
//!         .label(LabelColumn::new("fraudulent", "IsFraud", ValueType::Bool).with_variant("quickstart")),
//! )?;
//! client.register_training_set(
//!     TrainingSetRegistration::new("fraud_training", ("fraudulent", "quickstart"))
//!         .with_variant("quickstart")
//!         .feature(("avg_transactions", "quickstart")),
//! )?;
//! client.apply()?;
//!
//! for row in &client.training_set("fraud_training", "quickstart")? {
//!     println!("{:?} -> {}", row.features(), row.label());
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod handles;

// Re-export main types
pub use builder::ClientBuilder;
pub use client::Client;
pub use config::ClientConfig;
pub use error::{Result, SdkError};
pub use handles::{
    ColumnResource, EntityHandle, FeatureColumn, FileSource, LabelColumn, LocalProvider,
    ResourceRegistration, SourceHandle, TrainingSetRegistration, TransformationSource,
    UserHandle,
};

// Re-export commonly used types from dependencies
pub use featurebox_core::{
    AggregateFunction, DataFrameTransformation, FilterOperator, NameVariant, Resource, ResourceId,
    Value, ValueType,
};
pub use featurebox_registry::{ApplyReport, RegistryError};
pub use featurebox_runtime::{
    Batch, BatchedDataset, CacheStats, Dataset, RuntimeError, TrainingRow,
};
