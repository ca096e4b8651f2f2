use async_trait::async_trait;

use crate::config::Dsn;
use crate::error::ClientError;
use crate::types::{Bindings, ExecOutcome, RawResultSet};

/// Result type returned by database client implementations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// A live link to the database, owned by one driver.
///
/// Implementations are responsible for:
/// - Converting bindings to native parameter types
/// - Executing prepared statements and reporting client diagnostics
/// - Converting rows to [`RawResultSet`]
#[async_trait]
pub trait Connection: Send {
    /// Execute a statement and fetch every result set it produces, in order.
    async fn query(&mut self, sql: &str, bindings: &Bindings) -> ClientResult<Vec<RawResultSet>>;

    /// Execute a data-modifying statement.
    async fn exec(&mut self, sql: &str, bindings: &Bindings) -> ClientResult<ExecOutcome>;

    async fn begin(&mut self) -> ClientResult<()>;

    async fn commit(&mut self) -> ClientResult<()>;

    async fn rollback(&mut self) -> ClientResult<()>;

    fn in_transaction(&self) -> ClientResult<bool>;
}

/// Opens [`Connection`]s from a connection string and credentials.
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: Connection;

    async fn connect(&self, dsn: &Dsn, user: &str, password: &str)
        -> ClientResult<Self::Connection>;
}
