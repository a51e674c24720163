//! Dataframe transformation execution

use crate::error::{Result, RuntimeError};
use crate::table::Table;
use featurebox_core::{AggregateFunction, FilterOperator, NameVariant, TransformStep, Value};
use std::cmp::Ordering;
use tracing::debug;

/// Run every step of a transformation over its input table
pub fn run_steps(name: &NameVariant, input: &Table, steps: &[TransformStep]) -> Result<Table> {
    let mut table = input.clone();
    for step in steps {
        table = apply_step(name, table, step)?;
        debug!(transformation = %name, rows = table.len(), "Applied step");
    }
    let (_, columns, rows) = table.into_parts();
    Table::from_rows(name.to_string(), columns, rows)
}

fn apply_step(name: &NameVariant, table: Table, step: &TransformStep) -> Result<Table> {
    match step {
        TransformStep::Select { columns } => select(table, columns),
        TransformStep::Rename { from, to } => rename(name, table, from, to),
        TransformStep::Filter {
            column,
            operator,
            value,
        } => filter(table, column, *operator, value),
        TransformStep::Aggregate {
            group_by,
            column,
            function,
        } => aggregate(table, group_by, column, *function),
    }
}

fn select(table: Table, columns: &[String]) -> Result<Table> {
    let indices = columns
        .iter()
        .map(|c| table.column_index(c))
        .collect::<Result<Vec<_>>>()?;
    let (name, _, rows) = table.into_parts();
    let rows = rows
        .into_iter()
        .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
        .collect();
    Table::from_rows(name, columns.to_vec(), rows)
}

fn rename(name: &NameVariant, table: Table, from: &str, to: &str) -> Result<Table> {
    let idx = table.column_index(from)?;
    if from != to && table.columns().iter().any(|c| c == to) {
        return Err(RuntimeError::Transformation {
            name: name.clone(),
            reason: format!("cannot rename {} to existing column {}", from, to),
        });
    }
    let (table_name, mut columns, rows) = table.into_parts();
    columns[idx] = to.to_string();
    Table::from_rows(table_name, columns, rows)
}

fn filter(table: Table, column: &str, operator: FilterOperator, value: &Value) -> Result<Table> {
    let idx = table.column_index(column)?;
    let (name, columns, rows) = table.into_parts();
    let rows = rows
        .into_iter()
        .filter(|row| matches_filter(&row[idx], operator, value))
        .collect();
    Table::from_rows(name, columns, rows)
}

/// Null cells never match a filter
fn matches_filter(cell: &Value, operator: FilterOperator, value: &Value) -> bool {
    if cell.is_null() || value.is_null() {
        return false;
    }
    let ord = cell.compare(value);
    match operator {
        FilterOperator::Eq => ord == Ordering::Equal,
        FilterOperator::Ne => ord != Ordering::Equal,
        FilterOperator::Gt => ord == Ordering::Greater,
        FilterOperator::Ge => ord != Ordering::Less,
        FilterOperator::Lt => ord == Ordering::Less,
        FilterOperator::Le => ord != Ordering::Greater,
    }
}

/// Group rows by `group_by` and reduce `column` per group.
///
/// Output has columns `[group_by, column]` and one row per non-null key,
/// sorted ascending by key.
fn aggregate(
    table: Table,
    group_by: &str,
    column: &str,
    function: AggregateFunction,
) -> Result<Table> {
    let key_idx = table.column_index(group_by)?;
    let value_idx = table.column_index(column)?;

    let mut pairs: Vec<(&Value, &Value)> = table
        .rows()
        .iter()
        .filter(|row| !row[key_idx].is_null())
        .map(|row| (&row[key_idx], &row[value_idx]))
        .collect();
    // Stable sort keeps source order inside each group for first/last
    pairs.sort_by(|a, b| a.0.compare(b.0));

    let mut rows = Vec::new();
    let mut start = 0;
    while start < pairs.len() {
        let key = pairs[start].0;
        let end = pairs[start..]
            .iter()
            .position(|(k, _)| k.compare(key) != Ordering::Equal)
            .map_or(pairs.len(), |offset| start + offset);
        let values: Vec<&Value> = pairs[start..end]
            .iter()
            .map(|(_, v)| *v)
            .filter(|v| !v.is_null())
            .collect();
        rows.push(vec![key.clone(), reduce(function, &values)]);
        start = end;
    }

    Table::from_rows(
        table.name().to_string(),
        vec![group_by.to_string(), column.to_string()],
        rows,
    )
}

/// Reduce the non-null values of one group
pub(crate) fn reduce(function: AggregateFunction, values: &[&Value]) -> Value {
    match function {
        AggregateFunction::Count => Value::Int(values.len() as i64),
        AggregateFunction::First => values.first().map_or(Value::Null, |v| (*v).clone()),
        AggregateFunction::Last => values.last().map_or(Value::Null, |v| (*v).clone()),
        AggregateFunction::Min => values
            .iter()
            .min_by(|a, b| a.compare(b))
            .map_or(Value::Null, |v| (*v).clone()),
        AggregateFunction::Max => values
            .iter()
            .max_by(|a, b| a.compare(b))
            .map_or(Value::Null, |v| (*v).clone()),
        AggregateFunction::Sum => {
            if values.iter().all(|v| matches!(v, Value::Int(_))) {
                let total = values.iter().filter_map(|v| match v {
                    Value::Int(i) => Some(*i),
                    _ => None,
                });
                Value::Int(total.sum())
            } else {
                Value::Float(values.iter().filter_map(|v| v.as_f64()).sum())
            }
        }
        AggregateFunction::Mean => {
            let numbers: Vec<f64> = values.iter().filter_map(|v| v.as_f64()).collect();
            if numbers.is_empty() {
                Value::Null
            } else {
                Value::Float(numbers.iter().sum::<f64>() / numbers.len() as f64)
            }
        }
    }
}
