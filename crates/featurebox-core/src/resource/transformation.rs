//! Dataframe transformation definitions
//!
//! A transformation is declared as an ordered list of steps applied to a
//! single input source. Declaring it as data (instead of as an opaque
//! function) is what makes two registrations structurally comparable.

use crate::resource::NameVariant;
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transformation over one registered source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrameTransformation {
    /// Input sources; dataframe transformations take exactly one
    pub inputs: Vec<NameVariant>,

    /// Steps applied in order
    pub steps: Vec<TransformStep>,
}

impl DataFrameTransformation {
    pub fn new(input: NameVariant) -> Self {
        Self {
            inputs: vec![input],
            steps: Vec::new(),
        }
    }

    pub fn step(mut self, step: TransformStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Group by `group_by` and aggregate `column` with `function`
    pub fn aggregate(
        self,
        group_by: impl Into<String>,
        column: impl Into<String>,
        function: AggregateFunction,
    ) -> Self {
        self.step(TransformStep::Aggregate {
            group_by: group_by.into(),
            column: column.into(),
            function,
        })
    }

    pub fn select(self, columns: &[&str]) -> Self {
        self.step(TransformStep::Select {
            columns: columns.iter().map(|c| c.to_string()).collect(),
        })
    }

    pub fn rename(self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.step(TransformStep::Rename {
            from: from.into(),
            to: to.into(),
        })
    }

    pub fn filter(
        self,
        column: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<Value>,
    ) -> Self {
        self.step(TransformStep::Filter {
            column: column.into(),
            operator,
            value: value.into(),
        })
    }
}

/// A single transformation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformStep {
    /// Keep only the listed columns, in the listed order
    Select { columns: Vec<String> },

    /// Rename a column
    Rename { from: String, to: String },

    /// Keep rows where `column <operator> value`
    Filter {
        column: String,
        operator: FilterOperator,
        value: Value,
    },

    /// One output row per distinct `group_by` value with columns `[group_by, column]`
    Aggregate {
        group_by: String,
        column: String,
        function: AggregateFunction,
    },
}

/// Aggregation functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateFunction {
    Mean,
    Sum,
    Min,
    Max,
    Count,
    First,
    Last,
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregateFunction::Mean => "mean",
            AggregateFunction::Sum => "sum",
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
            AggregateFunction::Count => "count",
            AggregateFunction::First => "first",
            AggregateFunction::Last => "last",
        };
        f.write_str(name)
    }
}

/// Comparison operators for filter steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}
