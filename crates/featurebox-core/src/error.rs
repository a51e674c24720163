//! Error types for featurebox core

use crate::types::ValueType;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Cannot cast {value} to {target}")]
    InvalidCast { value: String, target: ValueType },

    #[error("Unknown value type: {0}")]
    UnknownValueType(String),

    #[error("Cannot fingerprint definition: {0}")]
    Fingerprint(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
