use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{MySqlRsError, Result};
use crate::types::SqlValue;

/// Driver-agnostic raw result set as reported by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResultSet {
    /// Column names in order
    pub columns: Vec<String>,
    /// Rows, where each row holds values in column order
    pub rows: Vec<Vec<SqlValue>>,
}

impl RawResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// A single row result from a query.
/// Values are kept in column order and accessed by column name.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<SqlValue>,
}

impl Row {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<SqlValue>) -> Self {
        Self { columns, values }
    }

    /// Gets a value by column name.
    pub fn get(&self, column: &str) -> Result<&SqlValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
            .ok_or_else(|| MySqlRsError::ColumnNotFound(column.to_string()))
    }

    /// Gets a value by position.
    pub fn get_index(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    /// Returns all column names in this row.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Hydrates the row into a record type keyed by column name.
    /// Duplicate column names keep the last value.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        let object: serde_json::Map<String, serde_json::Value> = self
            .columns
            .iter()
            .zip(self.values.iter())
            .map(|(col, val)| (col.clone(), val.to_json()))
            .collect();
        Ok(serde_json::from_value(serde_json::Value::Object(object))?)
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
