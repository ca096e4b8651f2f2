mod result;
mod row;
mod sql_value;
mod statement;

pub use result::{
    DeleteResult, ExecOutcome, ExecutionResult, InsertResult, ProcedureResult, SelectResult,
    UpdateResult,
};
pub use row::{RawResultSet, Row};
pub use sql_value::SqlValue;
pub use statement::{Bindings, CompiledStatement, StatementKind};
