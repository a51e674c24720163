//! Declared value types of features and labels

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value type declared when registering a feature or label.
///
/// `Bool` and `Boolean` cast identically but are distinct declarations, so
/// re-registering a `bool` label as `boolean` is a redefinition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Int,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Bool,
    Boolean,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
            ValueType::Float32 => "float32",
            ValueType::Float64 => "float64",
            ValueType::String => "string",
            ValueType::Bool => "bool",
            ValueType::Boolean => "boolean",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, ValueType::String | ValueType::Bool | ValueType::Boolean)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(ValueType::Int),
            "int32" => Ok(ValueType::Int32),
            "int64" => Ok(ValueType::Int64),
            "float32" => Ok(ValueType::Float32),
            "float64" => Ok(ValueType::Float64),
            "string" => Ok(ValueType::String),
            "bool" => Ok(ValueType::Bool),
            "boolean" => Ok(ValueType::Boolean),
            other => Err(CoreError::UnknownValueType(other.to_string())),
        }
    }
}
