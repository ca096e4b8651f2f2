//! mysqlrs - MySQL dialect and statement executor for compiled SQL statements
//!
//! # Example
//! ```ignore
//! use mysqlrs::{Bindings, CompiledStatement, ConnectParams, MySqlDriver};
//!
//! // Connect to database
//! let mut driver = MySqlDriver::new();
//! driver.connect(&ConnectParams::new("localhost").database("shop")).await?;
//!
//! // Execute a compiled SELECT
//! let row = driver
//!     .execute_select(
//!         &CompiledStatement::select("SELECT `id`, `name` FROM `users` WHERE `name` = :v1")
//!             .with_bindings(Bindings::named([("v1", "John")])),
//!     )
//!     .await?
//!     .single_row()?;
//!
//! let id = row.get("id")?;
//! let name = row.get("name")?;
//! ```

pub mod config;
pub mod dialect;
pub mod drivers;
pub mod error;
pub mod traits;
pub mod types;

mod driver;

// Re-export main types for convenient access
pub use config::{ConnectParams, Dsn};
pub use dialect::{Dialect, GenericDialect, JoinType, MySqlDialect};
pub use driver::MySqlDriver;
pub use error::{ClientError, ErrorKind, MySqlRsError, Result, TransactionOp};
pub use traits::{Connection, Connector};
pub use types::{
    Bindings, CompiledStatement, DeleteResult, ExecOutcome, ExecutionResult, InsertResult,
    ProcedureResult, RawResultSet, Row, SelectResult, SqlValue, StatementKind, UpdateResult,
};
