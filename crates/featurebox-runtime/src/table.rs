//! Row-oriented in-memory tables

use crate::error::{Result, RuntimeError};
use featurebox_core::Value;

/// A table with named columns and rows of values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from columns and rows, checking row widths
    pub fn from_rows(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self> {
        let mut table = Self::new(name, columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(RuntimeError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, or `ColumnNotFound`
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| RuntimeError::ColumnNotFound {
                column: column.to_string(),
                table: self.name.clone(),
            })
    }

    /// All values of one column, in row order
    pub fn column(&self, column: &str) -> Result<Vec<&Value>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub(crate) fn into_parts(self) -> (String, Vec<String>, Vec<Vec<Value>>) {
        (self.name, self.columns, self.rows)
    }
}

/// Join key for an entity cell. Null cells have no key.
pub fn entity_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_rows(
            "transactions",
            vec!["CustomerID".to_string(), "TransactionAmount".to_string()],
            vec![
                vec![Value::from("C1"), Value::Float(10.0)],
                vec![Value::from("C2"), Value::Int(3)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_column_lookup() {
        let t = table();
        assert_eq!(t.len(), 2);
        assert_eq!(t.column_index("TransactionAmount").unwrap(), 1);
        assert_eq!(
            t.column("CustomerID").unwrap(),
            vec![&Value::from("C1"), &Value::from("C2")]
        );
    }

    #[test]
    fn test_missing_column() {
        let err = table().column_index("IsFraud").unwrap_err();
        assert_eq!(err.to_string(), "Column IsFraud not found in transactions");
    }

    #[test]
    fn test_row_width_checked() {
        let mut t = table();
        assert!(matches!(
            t.push_row(vec![Value::Null]),
            Err(RuntimeError::RowWidth {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_entity_key() {
        assert_eq!(entity_key(&Value::Int(42)), Some("42".to_string()));
        assert_eq!(entity_key(&Value::from("C1")), Some("C1".to_string()));
        assert_eq!(entity_key(&Value::Null), None);
    }
}
