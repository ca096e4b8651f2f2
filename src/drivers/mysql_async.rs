use async_trait::async_trait;
use mysql_async::{prelude::*, Conn, OptsBuilder};
use tracing::debug;

use crate::config::Dsn;
use crate::error::ClientError;
use crate::traits::{ClientResult, Connection, Connector};
use crate::types::{Bindings, ExecOutcome, RawResultSet, SqlValue};

/// Opens connections with mysql_async.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsyncMysqlConnector;

impl AsyncMysqlConnector {
    pub fn new() -> Self {
        Self
    }

    fn opts(dsn: &Dsn, user: &str, password: &str) -> ClientResult<OptsBuilder> {
        if !is_charset_name(&dsn.charset) {
            return Err(ClientError::general(format!(
                "Invalid character set name '{}'",
                dsn.charset
            )));
        }

        Ok(OptsBuilder::default()
            .ip_or_hostname(dsn.host.clone())
            .tcp_port(dsn.port)
            .user(Some(user))
            .pass((!password.is_empty()).then_some(password))
            .db_name(dsn.dbname.clone())
            .init(vec![format!("SET NAMES {}", dsn.charset)]))
    }
}

/// Charset names go into `SET NAMES` unquoted, so only `[A-Za-z0-9_]+` is accepted.
fn is_charset_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Ends the fetched sets with the column-less status set the server closes
/// every statement with.
///
/// mysql_async stops iterating before that final OK packet, so it is added
/// here unless the client already surfaced it.
fn close_result_sets(mut sets: Vec<RawResultSet>) -> Vec<RawResultSet> {
    let closed = sets.last().is_some_and(|set| set.columns.is_empty());
    if !closed {
        sets.push(RawResultSet::empty());
    }
    sets
}

#[async_trait]
impl Connector for AsyncMysqlConnector {
    type Connection = AsyncMysqlConnection;

    async fn connect(
        &self,
        dsn: &Dsn,
        user: &str,
        password: &str,
    ) -> ClientResult<AsyncMysqlConnection> {
        let conn = Conn::new(Self::opts(dsn, user, password)?).await?;
        Ok(AsyncMysqlConnection {
            conn,
            in_transaction: false,
        })
    }
}

/// MySQL connection backed by mysql_async.
///
/// Transaction state is tracked locally from the statements this
/// connection issues.
pub struct AsyncMysqlConnection {
    conn: Conn,
    in_transaction: bool,
}

impl AsyncMysqlConnection {
    async fn run(&mut self, sql: &'static str) -> ClientResult<()> {
        debug!(sql, "Running transaction statement");
        self.conn.query_drop(sql).await?;
        Ok(())
    }
}

#[async_trait]
impl Connection for AsyncMysqlConnection {
    async fn query(&mut self, sql: &str, bindings: &Bindings) -> ClientResult<Vec<RawResultSet>> {
        let mut result = self
            .conn
            .exec_iter(sql, mysql_async::Params::from(bindings))
            .await?;

        let mut sets = Vec::new();
        while !result.is_empty() {
            let columns: Vec<String> = result
                .columns_ref()
                .iter()
                .map(|c| c.name_str().into_owned())
                .collect();
            let rows: Vec<mysql_async::Row> = result.collect().await?;
            let rows = rows
                .into_iter()
                .map(|row| row.unwrap().into_iter().map(SqlValue::from).collect())
                .collect();
            sets.push(RawResultSet::new(columns, rows));
        }

        Ok(close_result_sets(sets))
    }

    async fn exec(&mut self, sql: &str, bindings: &Bindings) -> ClientResult<ExecOutcome> {
        self.conn
            .exec_drop(sql, mysql_async::Params::from(bindings))
            .await?;

        Ok(ExecOutcome::new(
            self.conn.affected_rows(),
            self.conn.last_insert_id(),
        ))
    }

    async fn begin(&mut self) -> ClientResult<()> {
        if self.in_transaction {
            return Err(ClientError::general("There is already an active transaction"));
        }
        self.run("START TRANSACTION").await?;
        self.in_transaction = true;
        Ok(())
    }

    async fn commit(&mut self) -> ClientResult<()> {
        if !self.in_transaction {
            return Err(ClientError::general("There is no active transaction"));
        }
        self.run("COMMIT").await?;
        self.in_transaction = false;
        Ok(())
    }

    async fn rollback(&mut self) -> ClientResult<()> {
        if !self.in_transaction {
            return Err(ClientError::general("There is no active transaction"));
        }
        // The server ends the transaction even when ROLLBACK reports an error.
        self.in_transaction = false;
        self.run("ROLLBACK").await
    }

    fn in_transaction(&self) -> ClientResult<bool> {
        Ok(self.in_transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConnectParams;

    #[test]
    fn test_opts_from_dsn() {
        let params = ConnectParams::new("db.internal")
            .port(3307)
            .user("app")
            .password("pw")
            .database("shop")
            .encoding("utf8mb4");
        let opts: mysql_async::Opts =
            AsyncMysqlConnector::opts(&params.dsn(), &params.user, &params.password)
                .unwrap()
                .into();

        assert_eq!(opts.ip_or_hostname(), "db.internal");
        assert_eq!(opts.tcp_port(), 3307);
        assert_eq!(opts.user(), Some("app"));
        assert_eq!(opts.pass(), Some("pw"));
        assert_eq!(opts.db_name(), Some("shop"));
        assert_eq!(opts.init(), &["SET NAMES utf8mb4".to_string()]);
    }

    #[test]
    fn test_opts_empty_password() {
        let dsn = ConnectParams::default().dsn();
        let opts: mysql_async::Opts = AsyncMysqlConnector::opts(&dsn, "root", "").unwrap().into();

        assert_eq!(opts.pass(), None);
        assert_eq!(opts.db_name(), None);
    }

    #[test]
    fn test_opts_reject_unsafe_charset() {
        let dsn = ConnectParams::default().encoding("utf8; DROP TABLE users").dsn();
        let err = AsyncMysqlConnector::opts(&dsn, "root", "").unwrap_err();

        assert_eq!(err.sql_state, "HY000");
        assert!(err.message.contains("Invalid character set name"));
        assert!(is_charset_name("utf8mb4"));
        assert!(!is_charset_name(""));
        assert!(!is_charset_name("latin1'"));
    }

    fn ids(values: &[i64]) -> RawResultSet {
        RawResultSet::new(
            vec!["id".to_string()],
            values.iter().map(|v| vec![SqlValue::Int64(*v)]).collect(),
        )
    }

    #[test]
    fn test_call_keeps_every_user_set() {
        // CALL p() where p runs a single SELECT
        let sets = close_result_sets(vec![ids(&[1])]);
        assert_eq!(sets, vec![ids(&[1]), RawResultSet::empty()]);

        let procedure = crate::types::ProcedureResult::from_raw(sets);
        assert_eq!(procedure.len(), 1);
        assert_eq!(procedure.results_ref()[0].len(), 1);
    }

    #[test]
    fn test_call_with_several_sets() {
        let sets = close_result_sets(vec![ids(&[1, 2]), ids(&[3])]);
        assert_eq!(sets.len(), 3);
        assert_eq!(crate::types::ProcedureResult::from_raw(sets).len(), 2);
    }

    #[test]
    fn test_status_set_not_added_twice() {
        let sets = close_result_sets(vec![ids(&[1]), RawResultSet::empty()]);
        assert_eq!(sets.len(), 2);

        // A procedure without SELECTs only yields the status set
        assert_eq!(close_result_sets(Vec::new()), vec![RawResultSet::empty()]);
    }
}
