use std::fmt;

use thiserror::Error;

use crate::types::StatementKind;

/// SQLSTATE reported for integrity constraint violations.
pub const INTEGRITY_VIOLATION_STATE: &str = "23000";

/// SQLSTATE used for client failures that carry no server state.
pub const GENERAL_ERROR_STATE: &str = "HY000";

/// Diagnostic reported by the underlying database client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("SQLSTATE[{sql_state}]: {message}")]
pub struct ClientError {
    pub sql_state: String,
    /// Vendor error code, when the server reported one.
    pub code: Option<u16>,
    pub message: String,
}

impl ClientError {
    pub fn new(sql_state: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sql_state: sql_state.into(),
            code: None,
            message: message.into(),
        }
    }

    /// A client failure with no server state attached.
    pub fn general(message: impl Into<String>) -> Self {
        Self::new(GENERAL_ERROR_STATE, message)
    }

    pub fn with_code(mut self, code: u16) -> Self {
        self.code = Some(code);
        self
    }

    /// Whether the diagnostic describes a unique key collision.
    ///
    /// Matches on the message text, so it depends on the server's locale.
    pub fn is_duplicate_entry(&self) -> bool {
        self.sql_state == INTEGRITY_VIOLATION_STATE
            && self.message.to_lowercase().contains("duplicate entry")
    }
}

impl From<mysql_async::Error> for ClientError {
    fn from(err: mysql_async::Error) -> Self {
        match err {
            mysql_async::Error::Server(server) => Self {
                sql_state: server.state,
                code: Some(server.code),
                message: server.message,
            },
            other => Self::general(other.to_string()),
        }
    }
}

/// Transaction operation that failed, with its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionOp {
    Begin,
    Rollback,
    Commit,
    Status,
}

impl TransactionOp {
    pub fn code(self) -> u8 {
        match self {
            TransactionOp::Begin => 1,
            TransactionOp::Rollback => 2,
            TransactionOp::Commit => 3,
            TransactionOp::Status => 4,
        }
    }
}

impl fmt::Display for TransactionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionOp::Begin => "begin",
            TransactionOp::Rollback => "rollback",
            TransactionOp::Commit => "commit",
            TransactionOp::Status => "status check",
        };
        f.write_str(name)
    }
}

/// Broad classification of [`MySqlRsError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller misuse, never retryable.
    Usage,
    Connection,
    StatementExecution,
    /// Unique key collision on insert, a refinement of `StatementExecution`.
    DuplicateEntry,
    Transaction,
    /// Failure while reading an already returned result.
    Result,
}

/// Error type for mysqlrs operations
#[derive(Debug, Error)]
pub enum MySqlRsError {
    #[error("Not valid database link")]
    NoLink,

    #[error("Not valid {expected} statement, got {actual}")]
    InvalidStatement {
        expected: StatementKind,
        actual: StatementKind,
    },

    #[error("Connection failed: {0}")]
    ConnectionFailed(#[source] ClientError),

    #[error("{kind} statement failed: {message}")]
    StatementExecution {
        kind: StatementKind,
        sql: String,
        sql_state: String,
        message: String,
    },

    #[error("Duplicate entry: {message}")]
    DuplicateEntry { sql: String, message: String },

    #[error("Transaction {op} failed ({}): {message}", .op.code())]
    Transaction {
        op: TransactionOp,
        message: String,
        #[source]
        source: ClientError,
    },

    #[error("Expected {expected} row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Row decode failed: {0}")]
    RowDecode(#[from] serde_json::Error),
}

impl MySqlRsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MySqlRsError::NoLink | MySqlRsError::InvalidStatement { .. } => ErrorKind::Usage,
            MySqlRsError::ConnectionFailed(_) => ErrorKind::Connection,
            MySqlRsError::StatementExecution { .. } => ErrorKind::StatementExecution,
            MySqlRsError::DuplicateEntry { .. } => ErrorKind::DuplicateEntry,
            MySqlRsError::Transaction { .. } => ErrorKind::Transaction,
            MySqlRsError::UnexpectedRowCount { .. }
            | MySqlRsError::ColumnNotFound(_)
            | MySqlRsError::RowDecode(_) => ErrorKind::Result,
        }
    }

    pub fn is_usage_error(&self) -> bool {
        self.kind() == ErrorKind::Usage
    }

    /// True for every failed statement, duplicate entries included.
    pub fn is_statement_failure(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::StatementExecution | ErrorKind::DuplicateEntry
        )
    }

    /// The diagnostic text reported by the database client, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            MySqlRsError::ConnectionFailed(err) => Some(&err.message),
            MySqlRsError::StatementExecution { message, .. }
            | MySqlRsError::DuplicateEntry { message, .. }
            | MySqlRsError::Transaction { message, .. } => Some(message),
            _ => None,
        }
    }

    /// The SQL text of the statement that failed, if any.
    pub fn statement(&self) -> Option<&str> {
        match self {
            MySqlRsError::StatementExecution { sql, .. }
            | MySqlRsError::DuplicateEntry { sql, .. } => Some(sql),
            _ => None,
        }
    }

    pub(crate) fn transaction(op: TransactionOp, source: ClientError) -> Self {
        MySqlRsError::Transaction {
            op,
            message: source.message.clone(),
            source,
        }
    }
}

/// Result type alias for mysqlrs operations
pub type Result<T> = std::result::Result<T, MySqlRsError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_duplicate_entry_detection() {
        let dup = ClientError::new("23000", "Duplicate entry 'a@b.c' for key 'email'");
        assert!(dup.is_duplicate_entry());

        let lower = ClientError::new("23000", "duplicate ENTRY '1' for key 'PRIMARY'");
        assert!(lower.is_duplicate_entry());

        let fk = ClientError::new("23000", "Cannot add or update a child row");
        assert!(!fk.is_duplicate_entry());

        let other_state = ClientError::new("42S02", "Duplicate entry in message only");
        assert!(!other_state.is_duplicate_entry());
    }

    #[test]
    fn test_transaction_codes() {
        assert_eq!(TransactionOp::Begin.code(), 1);
        assert_eq!(TransactionOp::Rollback.code(), 2);
        assert_eq!(TransactionOp::Commit.code(), 3);
        assert_eq!(TransactionOp::Status.code(), 4);
    }

    #[test]
    fn test_transaction_error_keeps_source() {
        let err = MySqlRsError::transaction(
            TransactionOp::Commit,
            ClientError::general("There is no active transaction"),
        );

        assert_eq!(err.kind(), ErrorKind::Transaction);
        assert_eq!(err.diagnostic(), Some("There is no active transaction"));
        assert_eq!(
            err.to_string(),
            "Transaction commit failed (3): There is no active transaction"
        );
        let source = err.source().expect("source is kept");
        assert!(source.to_string().contains("HY000"));
    }

    #[test]
    fn test_usage_errors() {
        assert!(MySqlRsError::NoLink.is_usage_error());
        let err = MySqlRsError::InvalidStatement {
            expected: StatementKind::Select,
            actual: StatementKind::Delete,
        };
        assert!(err.is_usage_error());
        assert_eq!(err.to_string(), "Not valid select statement, got delete");
        assert_eq!(err.diagnostic(), None);
    }

    #[test]
    fn test_statement_failures() {
        let dup = MySqlRsError::DuplicateEntry {
            sql: "INSERT INTO `users` (`email`) VALUES (?)".to_string(),
            message: "Duplicate entry 'a@b.c' for key 'email'".to_string(),
        };
        assert_eq!(dup.kind(), ErrorKind::DuplicateEntry);
        assert!(dup.is_statement_failure());

        let failed = MySqlRsError::StatementExecution {
            kind: StatementKind::Update,
            sql: "UPDATE `users` SET `email` = ?".to_string(),
            sql_state: "23000".to_string(),
            message: "Duplicate entry 'a@b.c' for key 'email'".to_string(),
        };
        assert!(failed.is_statement_failure());

        assert!(!MySqlRsError::NoLink.is_statement_failure());
        assert!(!MySqlRsError::ColumnNotFound("id".to_string()).is_statement_failure());
    }
}
