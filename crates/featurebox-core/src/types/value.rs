//! Scalar values stored in source tables, features and labels
//!
//! The `Value` enum represents a single cell. It is deliberately flat: tables
//! are row-oriented vectors of `Value`, and training set rows are vectors of
//! feature values plus one label value.

use crate::error::{CoreError, Result};
use crate::types::ValueType;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Scalar cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl Value {
    /// Infer a value from a raw text cell.
    ///
    /// Empty cells are null; integers, floats and `true`/`false` (any case)
    /// are recognised, everything else stays a string.
    pub fn parse_cell(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            // "NaN" marks a missing cell
            if f.is_nan() {
                return Value::Null;
            }
            return Value::Float(f);
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
        Value::String(trimmed.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Cast to a declared value type.
    ///
    /// Null casts to null for every type. Float types keep f64 precision.
    pub fn cast(&self, target: ValueType) -> Result<Value> {
        let invalid = || CoreError::InvalidCast {
            value: self.to_string(),
            target,
        };

        if self.is_null() {
            return Ok(Value::Null);
        }

        match target {
            ValueType::Int | ValueType::Int32 | ValueType::Int64 => {
                let int = match self {
                    Value::Int(i) => *i,
                    Value::Float(f) if f.is_finite() && f.fract() == 0.0 => *f as i64,
                    Value::Bool(b) => i64::from(*b),
                    Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(invalid()),
                };
                if target == ValueType::Int32 && i32::try_from(int).is_err() {
                    return Err(invalid());
                }
                Ok(Value::Int(int))
            }
            ValueType::Float32 | ValueType::Float64 => match self {
                Value::Int(i) => Ok(Value::Float(*i as f64)),
                Value::Float(f) => Ok(Value::Float(*f)),
                Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
                Value::String(s) => s
                    .trim()
                    .parse::<f64>()
                    .map(Value::Float)
                    .map_err(|_| invalid()),
                Value::Null => Ok(Value::Null),
            },
            ValueType::String => match self {
                Value::String(s) => Ok(Value::String(s.clone())),
                other => Ok(Value::String(other.to_string())),
            },
            ValueType::Bool | ValueType::Boolean => match self {
                Value::Bool(b) => Ok(Value::Bool(*b)),
                Value::Int(0) => Ok(Value::Bool(false)),
                Value::Int(1) => Ok(Value::Bool(true)),
                Value::Float(f) if *f == 0.0 => Ok(Value::Bool(false)),
                Value::Float(f) if *f == 1.0 => Ok(Value::Bool(true)),
                Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
                Value::String(s) if s.trim().eq_ignore_ascii_case("false") => {
                    Ok(Value::Bool(false))
                }
                _ => Err(invalid()),
            },
        }
    }

    /// Ordering used for grouping and comparison filters.
    ///
    /// Numbers compare numerically across int/float, strings lexically.
    /// Values of different kinds order as null < bool < number < string.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.rank().cmp(&b.rank()),
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        assert_eq!(Value::parse_cell(""), Value::Null);
        assert_eq!(Value::parse_cell("  "), Value::Null);
        assert_eq!(Value::parse_cell("42"), Value::Int(42));
        assert_eq!(Value::parse_cell("-3.5"), Value::Float(-3.5));
        assert_eq!(Value::parse_cell("True"), Value::Bool(true));
        assert_eq!(Value::parse_cell("false"), Value::Bool(false));
        assert_eq!(
            Value::parse_cell("C1410926"),
            Value::String("C1410926".to_string())
        );
    }

    #[test]
    fn test_cast_float_keeps_precision() {
        let mean = Value::Float(1234.5678901234);
        assert_eq!(mean.cast(ValueType::Float32).unwrap(), mean);
        assert_eq!(
            Value::Int(7).cast(ValueType::Float64).unwrap(),
            Value::Float(7.0)
        );
    }

    #[test]
    fn test_cast_int() {
        assert_eq!(Value::Float(3.0).cast(ValueType::Int).unwrap(), Value::Int(3));
        assert!(Value::Float(3.5).cast(ValueType::Int).is_err());
        assert!(Value::Int(i64::MAX).cast(ValueType::Int32).is_err());
        assert_eq!(
            Value::String(" 12 ".to_string()).cast(ValueType::Int64).unwrap(),
            Value::Int(12)
        );
    }

    #[test]
    fn test_cast_bool() {
        assert_eq!(Value::Int(1).cast(ValueType::Bool).unwrap(), Value::Bool(true));
        assert_eq!(
            Value::String("FALSE".to_string()).cast(ValueType::Bool).unwrap(),
            Value::Bool(false)
        );
        assert!(Value::Int(2).cast(ValueType::Bool).is_err());
        assert_eq!(
            Value::String("true".to_string()).cast(ValueType::Boolean).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_cast_null_and_string() {
        assert_eq!(Value::Null.cast(ValueType::Bool).unwrap(), Value::Null);
        assert_eq!(
            Value::Int(5).cast(ValueType::String).unwrap(),
            Value::String("5".to_string())
        );
    }

    #[test]
    fn test_invalid_cast_message() {
        let err = Value::String("abc".to_string())
            .cast(ValueType::Float64)
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot cast abc to float64");
    }

    #[test]
    fn test_compare_mixed_numbers() {
        assert_eq!(Value::Int(2).compare(&Value::Float(2.5)), Ordering::Less);
        assert_eq!(Value::Float(2.0).compare(&Value::Int(2)), Ordering::Equal);
        assert_eq!(
            Value::Null.compare(&Value::String("a".to_string())),
            Ordering::Less
        );
    }

    #[test]
    fn test_value_serde_json() {
        let values = vec![
            Value::Null,
            Value::Bool(true),
            Value::Int(3),
            Value::Float(2.5),
            Value::String("x".to_string()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,true,3,2.5,"x"]"#);
        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
