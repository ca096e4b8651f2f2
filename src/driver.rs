use tracing::{debug, info, warn};

use crate::config::{
    ConnectParams, DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_USER,
};
use crate::dialect::MySqlDialect;
use crate::drivers::AsyncMysqlConnector;
use crate::error::{ClientError, MySqlRsError, Result, TransactionOp};
use crate::traits::{Connection, Connector};
use crate::types::{
    CompiledStatement, DeleteResult, ExecOutcome, ExecutionResult, InsertResult,
    ProcedureResult, RawResultSet, SelectResult, StatementKind, UpdateResult,
};

/// Main entry point for mysqlrs.
/// Owns one database connection and executes compiled statements on it.
///
/// # Example
/// ```ignore
/// let mut driver = MySqlDriver::new();
/// driver.connect(&ConnectParams::new("localhost").database("shop")).await?;
///
/// let users = driver
///     .execute_select(&CompiledStatement::select("SELECT `id`, `name` FROM `users`"))
///     .await?;
/// ```
pub struct MySqlDriver<C: Connector = AsyncMysqlConnector> {
    connector: C,
    dialect: MySqlDialect,
    link: Option<C::Connection>,
}

impl MySqlDriver {
    /// Create a driver that connects with mysql_async.
    pub fn new() -> Self {
        Self::with_connector(AsyncMysqlConnector::new())
    }
}

impl Default for MySqlDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> MySqlDriver<C> {
    /// Create a driver with a custom connector.
    /// Useful for testing or using alternative database clients.
    pub fn with_connector(connector: C) -> Self {
        Self {
            connector,
            dialect: MySqlDialect::new(),
            link: None,
        }
    }

    /// Dialect used to compile statements for this driver.
    pub fn dialect(&self) -> &MySqlDialect {
        &self.dialect
    }

    pub fn default_host(&self) -> &'static str {
        DEFAULT_HOST
    }

    pub fn default_port(&self) -> u16 {
        DEFAULT_PORT
    }

    pub fn default_user(&self) -> &'static str {
        DEFAULT_USER
    }

    pub fn default_password(&self) -> &'static str {
        DEFAULT_PASSWORD
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    /// Open a connection, replacing the current one.
    /// On failure the driver is left without a connection.
    pub async fn connect(&mut self, params: &ConnectParams) -> Result<()> {
        self.link = None;

        let dsn = params.dsn();
        let conn = self
            .connector
            .connect(&dsn, &params.user, &params.password)
            .await
            .map_err(|e| {
                warn!(dsn = %dsn, error = %e, "MySQL connection failed");
                MySqlRsError::ConnectionFailed(e)
            })?;

        info!(
            host = %dsn.host,
            port = dsn.port,
            database = dsn.dbname.as_deref().unwrap_or(""),
            "Connected to MySQL"
        );
        self.link = Some(conn);
        Ok(())
    }

    /// Execute any compiled statement, choosing the path from its kind.
    pub async fn execute(&mut self, statement: &CompiledStatement) -> Result<ExecutionResult> {
        Ok(match statement.kind() {
            StatementKind::Select => ExecutionResult::Select(self.execute_select(statement).await?),
            StatementKind::Insert => ExecutionResult::Insert(self.execute_insert(statement).await?),
            StatementKind::Update => ExecutionResult::Update(self.execute_update(statement).await?),
            StatementKind::Delete => ExecutionResult::Delete(self.execute_delete(statement).await?),
            StatementKind::Procedure => {
                ExecutionResult::Procedure(self.execute_procedure(statement).await?)
            }
        })
    }

    pub async fn execute_select(&mut self, statement: &CompiledStatement) -> Result<SelectResult> {
        let sets = self.query(StatementKind::Select, statement).await?;
        let first = sets.into_iter().next().unwrap_or_else(RawResultSet::empty);
        Ok(SelectResult::from_raw(first))
    }

    pub async fn execute_insert(&mut self, statement: &CompiledStatement) -> Result<InsertResult> {
        let outcome = self.exec(StatementKind::Insert, statement).await?;
        Ok(InsertResult {
            affected_rows: outcome.affected_rows,
            last_insert_id: outcome.last_insert_id,
        })
    }

    pub async fn execute_update(&mut self, statement: &CompiledStatement) -> Result<UpdateResult> {
        let outcome = self.exec(StatementKind::Update, statement).await?;
        Ok(UpdateResult {
            affected_rows: outcome.affected_rows,
        })
    }

    pub async fn execute_delete(&mut self, statement: &CompiledStatement) -> Result<DeleteResult> {
        let outcome = self.exec(StatementKind::Delete, statement).await?;
        Ok(DeleteResult {
            affected_rows: outcome.affected_rows,
        })
    }

    /// Execute a stored procedure call and collect its result sets.
    pub async fn execute_procedure(
        &mut self,
        statement: &CompiledStatement,
    ) -> Result<ProcedureResult> {
        let sets = self.query(StatementKind::Procedure, statement).await?;
        Ok(ProcedureResult::from_raw(sets))
    }

    pub fn in_transaction(&self) -> Result<bool> {
        let link = self.link.as_ref().ok_or(MySqlRsError::NoLink)?;
        link.in_transaction()
            .map_err(|e| MySqlRsError::transaction(TransactionOp::Status, e))
    }

    pub async fn start_transaction(&mut self) -> Result<()> {
        debug!("Starting transaction");
        let result = self.link()?.begin().await;
        result.map_err(|e| transaction_failed(TransactionOp::Begin, e))
    }

    pub async fn commit(&mut self) -> Result<()> {
        debug!("Committing transaction");
        let result = self.link()?.commit().await;
        result.map_err(|e| transaction_failed(TransactionOp::Commit, e))
    }

    pub async fn rollback(&mut self) -> Result<()> {
        debug!("Rolling back transaction");
        let result = self.link()?.rollback().await;
        result.map_err(|e| transaction_failed(TransactionOp::Rollback, e))
    }

    fn link(&mut self) -> Result<&mut C::Connection> {
        self.link.as_mut().ok_or(MySqlRsError::NoLink)
    }

    /// Checks the link and the statement kind before any client call.
    fn prepare(
        &mut self,
        expected: StatementKind,
        statement: &CompiledStatement,
    ) -> Result<&mut C::Connection> {
        let link = self.link.as_mut().ok_or(MySqlRsError::NoLink)?;
        if statement.kind() != expected {
            return Err(MySqlRsError::InvalidStatement {
                expected,
                actual: statement.kind(),
            });
        }
        debug!(kind = %expected, sql = statement.sql(), "Executing statement");
        Ok(link)
    }

    async fn query(
        &mut self,
        kind: StatementKind,
        statement: &CompiledStatement,
    ) -> Result<Vec<RawResultSet>> {
        let link = self.prepare(kind, statement)?;
        link.query(statement.sql(), statement.bindings())
            .await
            .map_err(|e| statement_failed(kind, statement, e))
    }

    async fn exec(
        &mut self,
        kind: StatementKind,
        statement: &CompiledStatement,
    ) -> Result<ExecOutcome> {
        let link = self.prepare(kind, statement)?;
        link.exec(statement.sql(), statement.bindings())
            .await
            .map_err(|e| statement_failed(kind, statement, e))
    }
}

fn statement_failed(
    kind: StatementKind,
    statement: &CompiledStatement,
    err: ClientError,
) -> MySqlRsError {
    warn!(
        kind = %kind,
        sql = statement.sql(),
        sql_state = %err.sql_state,
        error = %err.message,
        "Statement failed"
    );

    if kind == StatementKind::Insert && err.is_duplicate_entry() {
        return MySqlRsError::DuplicateEntry {
            sql: statement.sql().to_string(),
            message: err.message,
        };
    }

    MySqlRsError::StatementExecution {
        kind,
        sql: statement.sql().to_string(),
        sql_state: err.sql_state,
        message: err.message,
    }
}

fn transaction_failed(op: TransactionOp, err: ClientError) -> MySqlRsError {
    warn!(op = %op, error = %err.message, "Transaction operation failed");
    MySqlRsError::transaction(op, err)
}
