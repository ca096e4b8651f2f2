use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{MySqlRsError, Result};
use crate::types::{RawResultSet, Row, StatementKind};

/// Counters reported by the client after a data-modifying statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecOutcome {
    pub affected_rows: u64,
    pub last_insert_id: Option<u64>,
}

impl ExecOutcome {
    pub fn new(affected_rows: u64, last_insert_id: Option<u64>) -> Self {
        Self {
            affected_rows,
            last_insert_id,
        }
    }
}

/// Rows returned by a SELECT or by one result set of a procedure call.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectResult {
    columns: Arc<[String]>,
    rows: Vec<Row>,
}

impl SelectResult {
    /// Creates a SelectResult from a RawResultSet.
    pub fn from_raw(raw: RawResultSet) -> Self {
        let columns: Arc<[String]> = raw.columns.into();
        let rows = raw
            .rows
            .into_iter()
            .map(|values| Row::new(Arc::clone(&columns), values))
            .collect();
        Self { columns, rows }
    }

    /// Extracts a single row from the result.
    /// Returns an error if the result contains zero or more than one row.
    pub fn single_row(self) -> Result<Row> {
        if self.rows.len() != 1 {
            return Err(MySqlRsError::UnexpectedRowCount {
                expected: 1,
                actual: self.rows.len(),
            });
        }
        Ok(self.rows.into_iter().next().unwrap())
    }

    /// Returns all rows from the result.
    pub fn rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns a reference to the rows without consuming the result.
    pub fn rows_ref(&self) -> &[Row] {
        &self.rows
    }

    /// Hydrates every row into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.rows.iter().map(Row::deserialize).collect()
    }

    /// Returns the column names from this result.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of rows in this result.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if this result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertResult {
    pub affected_rows: u64,
    /// Identifier generated for an AUTO_INCREMENT column, if the client reported one.
    pub last_insert_id: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateResult {
    pub affected_rows: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteResult {
    pub affected_rows: u64,
}

/// Result sets of a stored procedure call, without the trailing status set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcedureResult {
    results: Vec<SelectResult>,
}

impl ProcedureResult {
    /// Builds the result from every raw set the client fetched.
    /// The last raw set is the status set emitted for `CALL` and is dropped.
    pub fn from_raw(mut raw: Vec<RawResultSet>) -> Self {
        raw.pop();
        Self {
            results: raw.into_iter().map(SelectResult::from_raw).collect(),
        }
    }

    pub fn results(self) -> Vec<SelectResult> {
        self.results
    }

    pub fn results_ref(&self) -> &[SelectResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Outcome of [`crate::MySqlDriver::execute`], one variant per statement kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    Select(SelectResult),
    Insert(InsertResult),
    Update(UpdateResult),
    Delete(DeleteResult),
    Procedure(ProcedureResult),
}

impl ExecutionResult {
    pub fn kind(&self) -> StatementKind {
        match self {
            ExecutionResult::Select(_) => StatementKind::Select,
            ExecutionResult::Insert(_) => StatementKind::Insert,
            ExecutionResult::Update(_) => StatementKind::Update,
            ExecutionResult::Delete(_) => StatementKind::Delete,
            ExecutionResult::Procedure(_) => StatementKind::Procedure,
        }
    }

    /// Affected rows for data-modifying statements.
    pub fn affected_rows(&self) -> Option<u64> {
        match self {
            ExecutionResult::Insert(r) => Some(r.affected_rows),
            ExecutionResult::Update(r) => Some(r.affected_rows),
            ExecutionResult::Delete(r) => Some(r.affected_rows),
            ExecutionResult::Select(_) | ExecutionResult::Procedure(_) => None,
        }
    }
}
