//! Type system for featurebox
//!
//! - Scalar values read from sources and served as features/labels
//! - Declared value types of features and labels

pub mod value;
pub mod value_type;

pub use value::Value;
pub use value_type::ValueType;
